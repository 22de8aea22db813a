//! Product type conversion functions.

use product_desk_core::action::RemoteError;
use product_desk_core::{Price, Product, ProductId, ProductStatus, Variant, VariantId};

use crate::shopify::AdminShopifyError;

use super::super::queries::products_overview::{
    self, CurrencyCode, ProductsOverviewProductsEdgesNode,
};

// =============================================================================
// ProductsOverview conversions
// =============================================================================

/// Currency codes are forwarded as the platform spells them.
fn currency_code_to_string(code: CurrencyCode) -> String {
    match code {
        CurrencyCode::Other(code) => code,
        known => format!("{known:?}"),
    }
}

fn convert_status(status: products_overview::ProductStatus) -> ProductStatus {
    match status {
        products_overview::ProductStatus::ACTIVE => ProductStatus::Active,
        products_overview::ProductStatus::ARCHIVED => ProductStatus::Archived,
        products_overview::ProductStatus::DRAFT => ProductStatus::Draft,
        products_overview::ProductStatus::UNLISTED => ProductStatus::Unlisted,
        products_overview::ProductStatus::Other(other) => ProductStatus::from(other),
    }
}

/// Convert one product node.
///
/// The first image's transformed URL becomes `image_url`; missing inventory
/// counts read as zero.
///
/// # Errors
///
/// Returns `AdminShopifyError::InvalidResponse` if the price amount is not a
/// decimal number.
pub fn convert_product(
    product: ProductsOverviewProductsEdgesNode,
) -> Result<Product, AdminShopifyError> {
    let money = product.price_range.min_variant_price;
    let currency_code = currency_code_to_string(money.currency_code);
    let price = Price::from_scaled_amount(&money.amount, currency_code).map_err(|e| {
        AdminShopifyError::InvalidResponse(format!("product {}: {e}", product.id))
    })?;

    let image_url = product
        .images
        .edges
        .into_iter()
        .next()
        .map(|e| e.node.transformed_src);

    let variants = product
        .variants
        .edges
        .into_iter()
        .map(|e| Variant {
            id: VariantId::new(e.node.id),
            inventory_quantity: e.node.inventory_quantity.unwrap_or(0),
        })
        .collect();

    Ok(Product {
        id: ProductId::new(product.id),
        title: product.title,
        status: convert_status(product.status),
        vendor: product.vendor,
        price,
        image_url,
        variants,
    })
}

/// Convert a full product list, preserving platform order.
///
/// # Errors
///
/// Fails on the first product that cannot be converted; no partial list is
/// returned.
pub fn convert_product_connection(
    data: products_overview::ResponseData,
) -> Result<Vec<Product>, AdminShopifyError> {
    data.products
        .edges
        .into_iter()
        .map(|e| convert_product(e.node))
        .collect()
}

// =============================================================================
// Mutation userErrors
// =============================================================================

/// Forward mutation userErrors to the page unchanged.
///
/// Every mutation payload generates its own userError struct, so callers
/// pass `(field, message)` pairs.
pub fn convert_user_errors(
    errors: impl IntoIterator<Item = (Option<Vec<String>>, String)>,
) -> impl Iterator<Item = RemoteError> {
    errors.into_iter().map(|(field, message)| RemoteError {
        message,
        field: field.unwrap_or_default(),
    })
}
