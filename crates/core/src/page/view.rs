//! Render-ready view model of the product page.

use serde::Serialize;

use crate::types::Product;

use super::{PageMode, ProductPage};

/// Text shown when the product list is empty.
pub const EMPTY_LIST_MESSAGE: &str = "No products found";

/// One variant line under a product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantLine {
    pub id: String,
    pub inventory: i64,
}

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub price: String,
    pub status: String,
    pub vendor: String,
    pub image_url: String,
    pub variants: Vec<VariantLine>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.price.display(),
            status: product.status.label().to_string(),
            vendor: product.vendor.clone(),
            image_url: product.image_or_placeholder().to_string(),
            variants: product
                .variants
                .iter()
                .map(|v| VariantLine {
                    id: v.id.to_string(),
                    inventory: v.inventory_quantity,
                })
                .collect(),
        }
    }
}

/// Editable fields of the open update modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateModalView {
    pub product_id: String,
    pub title: String,
    pub price: String,
}

/// Everything the page template needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub search_term: String,
    pub is_loading: bool,
    pub products: Vec<ProductCard>,
    pub update_modal: Option<UpdateModalView>,
    pub delete_modal_open: bool,
}

impl PageView {
    /// Message for an empty list, if the list is empty.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.products.is_empty().then_some(EMPTY_LIST_MESSAGE)
    }
}

impl From<&ProductPage> for PageView {
    fn from(page: &ProductPage) -> Self {
        let update_modal = match page.mode() {
            PageMode::UpdateModal(edit) => Some(UpdateModalView {
                product_id: edit.product_id.to_string(),
                title: edit.title.clone(),
                price: edit.price.clone(),
            }),
            _ => None,
        };

        Self {
            search_term: page.search_term().to_string(),
            is_loading: page.is_loading(),
            products: page.products().iter().map(ProductCard::from).collect(),
            update_modal,
            delete_modal_open: matches!(page.mode(), PageMode::DeleteModal(_)),
        }
    }
}
