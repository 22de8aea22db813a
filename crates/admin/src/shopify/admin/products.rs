//! Product operations for Shopify Admin API.

use graphql_client::Response;
use tracing::instrument;

use product_desk_core::action::{ProductEdit, RemoteError, UpdatedProduct};
use product_desk_core::{Product, ProductId};

use super::conversions::{convert_product_connection, convert_user_errors};
use super::queries::{
    ProductDelete, ProductTitleAndPriceUpdate, ProductsOverview, product_delete,
    product_title_and_price_update, products_overview,
};
use super::{AdminClient, AdminShopifyError, GraphQLError};

/// Page size of the product list. There is no pagination.
const PRODUCT_LIST_LIMIT: i64 = 100;

/// Characters with meaning in Shopify's search syntax.
const SEARCH_SPECIAL_CHARS: &[char] = &['\\', ':', '(', ')', '"', '\'', '*'];

/// Outcome of a title/price update.
///
/// `errors` holds every top-level GraphQL error and every userError from
/// both mutations; none are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleAndPriceUpdate {
    pub updated_product: Option<UpdatedProduct>,
    pub errors: Vec<RemoteError>,
}

/// Escape a user search term for a `title:*<term>*` clause.
#[must_use]
pub fn escape_search_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if SEARCH_SPECIAL_CHARS.contains(&c) || c.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Search clause for an optional term; blank terms list everything.
fn title_query(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("title:*{}*", escape_search_term(t)))
}

impl AdminClient {
    /// List up to 100 products, optionally filtered by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response carries any
    /// GraphQL error, or a product cannot be normalized.
    #[instrument(skip(self))]
    pub async fn fetch_products(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<Product>, AdminShopifyError> {
        let variables = products_overview::Variables {
            first: PRODUCT_LIST_LIMIT,
            query: title_query(search),
        };

        let response = self.execute::<ProductsOverview>(variables).await?;
        let products = convert_product_connection(response)?;

        tracing::debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Rename a product and reprice one variant in one request.
    ///
    /// GraphQL and mutation errors are returned in the result, not as `Err`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the request itself fails.
    #[instrument(skip(self, edit), fields(product_id = %edit.product_id, variant_id = %edit.variant_id))]
    pub async fn update_title_and_price(
        &self,
        edit: &ProductEdit,
    ) -> Result<TitleAndPriceUpdate, AdminShopifyError> {
        use product_title_and_price_update::{ProductInput, ProductVariantInput, Variables};

        let variables = Variables {
            product: ProductInput {
                id: Some(edit.product_id.to_string()),
                title: Some(edit.title.clone()),
            },
            variant: ProductVariantInput {
                id: Some(edit.variant_id.to_string()),
                price: Some(edit.price.to_string()),
            },
        };

        let response = self.send::<ProductTitleAndPriceUpdate>(variables).await?;
        let update = collect_update(response);

        if !update.errors.is_empty() {
            tracing::warn!(
                error_count = update.errors.len(),
                errors = ?update.errors,
                "Product update returned errors"
            );
        }

        Ok(update)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response carries any
    /// GraphQL error or userError, or no deleted id comes back.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<ProductId, AdminShopifyError> {
        use product_delete::{ProductDeleteInput, Variables};

        let variables = Variables {
            input: ProductDeleteInput { id: id.to_string() },
        };

        let response = self.execute::<ProductDelete>(variables).await?;

        if let Some(payload) = response.product_delete {
            if !payload.user_errors.is_empty() {
                let error_messages: Vec<String> = payload
                    .user_errors
                    .iter()
                    .map(|e| {
                        let field = e.field.as_ref().map_or_else(String::new, |f| f.join("."));
                        format!("{}: {}", field, e.message)
                    })
                    .collect();
                return Err(AdminShopifyError::UserError(error_messages.join("; ")));
            }

            if let Some(deleted_id) = payload.deleted_product_id {
                return Ok(ProductId::new(deleted_id));
            }
        }

        Err(AdminShopifyError::GraphQL(vec![GraphQLError {
            message: "Product deletion failed".to_string(),
            path: vec![],
        }]))
    }
}

/// Merge top-level errors and both mutations' userErrors.
fn collect_update(
    response: Response<product_title_and_price_update::ResponseData>,
) -> TitleAndPriceUpdate {
    let mut errors: Vec<RemoteError> = response
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|e| {
            let error = GraphQLError::from(e);
            RemoteError {
                message: error.message,
                field: error
                    .path
                    .into_iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            }
        })
        .collect();

    let mut updated_product = None;
    if let Some(data) = response.data {
        if let Some(payload) = data.product_update {
            updated_product = payload.product.map(|p| UpdatedProduct {
                id: ProductId::new(p.id),
                title: p.title,
            });
            errors.extend(convert_user_errors(
                payload.user_errors.into_iter().map(|e| (e.field, e.message)),
            ));
        }
        if let Some(payload) = data.product_variant_update {
            errors.extend(convert_user_errors(
                payload.user_errors.into_iter().map(|e| (e.field, e.message)),
            ));
        }
    }

    TitleAndPriceUpdate {
        updated_product,
        errors,
    }
}
