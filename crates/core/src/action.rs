//! Wire contract between the product page and the action endpoint.
//!
//! The page submits one `application/x-www-form-urlencoded` body per action
//! ([`ActionForm`]); the endpoint validates it into an [`ActionRequest`] and
//! answers with an [`ActionResponse`] JSON body.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{PriceError, Product, ProductId, VariantId, parse_user_price};

/// Form field names, as posted by the page.
pub mod fields {
    pub const ACTION_TYPE: &str = "actionType";
    pub const SEARCH_TERM: &str = "searchTerm";
    pub const PRODUCT_ID: &str = "productId";
    pub const VARIANT_ID: &str = "variantId";
    pub const UPDATED_TITLE: &str = "updatedTitle";
    pub const UPDATED_PRICE: &str = "updatedPrice";
    pub const PRODUCT_ID_TO_DELETE: &str = "productIdToDelete";
}

/// `actionType` values.
pub mod action_types {
    pub const FETCH_PRODUCTS: &str = "fetchProducts";
    pub const UPDATE_PRODUCT: &str = "updateProduct";
    pub const DELETE_PRODUCT: &str = "deleteProduct";
}

/// Message returned after a successful deletion.
pub const DELETE_SUCCESS_MESSAGE: &str = "Product deleted successfully";

/// Message returned for every remote or unexpected failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to process request";

/// Raw form body of an action submission. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionForm {
    pub action_type: Option<String>,
    pub search_term: Option<String>,
    pub product_id: Option<String>,
    pub variant_id: Option<String>,
    pub updated_title: Option<String>,
    pub updated_price: Option<String>,
    pub product_id_to_delete: Option<String>,
}

/// A validated title/price edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEdit {
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub title: String,
    /// Price fixed to two decimals.
    pub price: Decimal,
}

/// A validated action. Exactly one executes per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    FetchProducts { search_term: Option<String> },
    UpdateProduct(ProductEdit),
    DeleteProduct { product_id: ProductId },
}

/// Validation failures, answered with HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRequestError {
    #[error("Invalid price")]
    InvalidPrice(#[source] PriceError),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

impl ActionRequest {
    /// Encode as form pairs for submission.
    #[must_use]
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::FetchProducts { search_term } => {
                let mut form = vec![(
                    fields::ACTION_TYPE,
                    action_types::FETCH_PRODUCTS.to_string(),
                )];
                if let Some(term) = search_term {
                    form.push((fields::SEARCH_TERM, term.clone()));
                }
                form
            }
            Self::UpdateProduct(edit) => vec![
                (fields::ACTION_TYPE, action_types::UPDATE_PRODUCT.to_string()),
                (fields::PRODUCT_ID, edit.product_id.to_string()),
                (fields::UPDATED_TITLE, edit.title.clone()),
                (fields::UPDATED_PRICE, edit.price.to_string()),
                (fields::VARIANT_ID, edit.variant_id.to_string()),
            ],
            Self::DeleteProduct { product_id } => vec![
                (fields::PRODUCT_ID_TO_DELETE, product_id.to_string()),
                (fields::ACTION_TYPE, action_types::DELETE_PRODUCT.to_string()),
            ],
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::FetchProducts { .. } => action_types::FETCH_PRODUCTS,
            Self::UpdateProduct(_) => action_types::UPDATE_PRODUCT,
            Self::DeleteProduct { .. } => action_types::DELETE_PRODUCT,
        }
    }
}

impl TryFrom<ActionForm> for ActionRequest {
    type Error = ActionRequestError;

    /// Deletion wins whenever `productIdToDelete` is present, then `actionType`
    /// selects between fetching and updating.
    fn try_from(form: ActionForm) -> Result<Self, Self::Error> {
        if let Some(product_id) = non_blank(form.product_id_to_delete) {
            return Ok(Self::DeleteProduct {
                product_id: ProductId::new(product_id),
            });
        }

        let action_type = form
            .action_type
            .ok_or(ActionRequestError::MissingField(fields::ACTION_TYPE))?;

        match action_type.as_str() {
            action_types::FETCH_PRODUCTS => Ok(Self::FetchProducts {
                search_term: non_blank(form.search_term).map(|t| t.trim().to_string()),
            }),
            action_types::UPDATE_PRODUCT => {
                let price = parse_user_price(form.updated_price.as_deref().unwrap_or_default())
                    .map_err(ActionRequestError::InvalidPrice)?;
                let product_id = non_blank(form.product_id)
                    .ok_or(ActionRequestError::MissingField(fields::PRODUCT_ID))?;
                let variant_id = non_blank(form.variant_id)
                    .ok_or(ActionRequestError::MissingField(fields::VARIANT_ID))?;
                let title = form
                    .updated_title
                    .ok_or(ActionRequestError::MissingField(fields::UPDATED_TITLE))?;

                Ok(Self::UpdateProduct(ProductEdit {
                    product_id: ProductId::new(product_id),
                    variant_id: VariantId::new(variant_id),
                    title,
                    price,
                }))
            }
            action_types::DELETE_PRODUCT => Err(ActionRequestError::MissingField(
                fields::PRODUCT_ID_TO_DELETE,
            )),
            other => Err(ActionRequestError::UnknownAction(other.to_string())),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Product fields echoed back after an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedProduct {
    pub id: ProductId,
    pub title: String,
}

/// A top-level GraphQL error or a mutation userError, forwarded to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    pub message: String,
    /// Input field path for userErrors, response path for top-level errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field: Vec<String>,
}

/// JSON body returned by the action endpoint.
///
/// Variant order matters for deserialization: `Updated` accepts any object,
/// so it comes last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionResponse {
    Products {
        products: Vec<Product>,
    },
    Message {
        message: String,
    },
    Failure {
        error: String,
    },
    Updated {
        #[serde(rename = "updatedProduct")]
        updated_product: Option<UpdatedProduct>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        errors: Vec<RemoteError>,
    },
}
