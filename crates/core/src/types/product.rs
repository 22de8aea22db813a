//! Normalized product model shared by the action endpoint and the page.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, ProductStatus, VariantId};

/// Image shown when a product has no images.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/100?text=No+Image";

/// A product variant with its inventory count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Variant ID.
    pub id: VariantId,
    /// Inventory quantity across all locations. May be negative.
    pub inventory_quantity: i64,
}

/// A product as listed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Product status.
    pub status: ProductStatus,
    /// Vendor name.
    pub vendor: String,
    /// Minimum variant price, already normalized to two decimals.
    pub price: Price,
    /// First image URL, if the product has any images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// First variants of the product, in platform order.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Image URL to render, falling back to the placeholder.
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    /// The variant whose price is edited from the page.
    #[must_use]
    pub fn primary_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn bare_product() -> Product {
        Product {
            id: ProductId::new("gid://shopify/Product/1"),
            title: "Tee".to_string(),
            status: ProductStatus::Draft,
            vendor: "Acme".to_string(),
            price: Price::new(Decimal::new(1000, 2), "USD"),
            image_url: None,
            variants: vec![],
        }
    }

    #[test]
    fn test_product_without_images_uses_placeholder() {
        let product = bare_product();
        assert_eq!(product.image_or_placeholder(), PLACEHOLDER_IMAGE_URL);
        assert!(product.primary_variant().is_none());
    }

    #[test]
    fn test_product_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "gid://shopify/Product/1",
            "title": "Tee",
            "status": "DRAFT",
            "vendor": "Acme",
            "price": {"amount": "10.00", "currencyCode": "USD"}
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product, bare_product());
    }
}
