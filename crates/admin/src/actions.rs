//! Admin API operations behind the action contract.
//!
//! The action endpoint and the server-driven page both run submissions
//! through [`perform`], so each validated request maps to exactly one Admin
//! API operation in one place.

use tracing::instrument;

use product_desk_core::action::{ActionRequest, ActionResponse, DELETE_SUCCESS_MESSAGE};

use crate::{error::AppError, shopify::AdminClient};

/// Run one validated request against the Admin API.
///
/// # Errors
///
/// Returns [`AppError::Shopify`] when the Admin API call fails. Update
/// `userErrors` are not failures; they come back in the response.
#[instrument(skip_all, fields(action = request.kind()))]
pub async fn perform(
    shopify: &AdminClient,
    request: ActionRequest,
) -> Result<ActionResponse, AppError> {
    let response = match request {
        ActionRequest::FetchProducts { search_term } => {
            let products = shopify.fetch_products(search_term.as_deref()).await?;
            tracing::info!(count = products.len(), "Products fetched");
            ActionResponse::Products { products }
        }
        ActionRequest::UpdateProduct(edit) => {
            let update = shopify.update_title_and_price(&edit).await?;
            tracing::info!(
                product_id = %edit.product_id,
                error_count = update.errors.len(),
                "Product update finished"
            );
            ActionResponse::Updated {
                updated_product: update.updated_product,
                errors: update.errors,
            }
        }
        ActionRequest::DeleteProduct { product_id } => {
            shopify.delete_product(&product_id).await?;
            tracing::info!(product_id = %product_id, "Product deleted");
            ActionResponse::Message {
                message: DELETE_SUCCESS_MESSAGE.to_string(),
            }
        }
    };

    Ok(response)
}
