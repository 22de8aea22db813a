//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module holds the Admin API access token**, which can read and
//! modify every product in the store. The token never leaves the server;
//! the browser only ever talks to the action endpoint.
//!
//! # Architecture
//!
//! - `graphql_client` request/response envelopes, `reqwest` for HTTP
//! - Direct API calls to Shopify (no local cache or database)
//! - No retries: rate limiting surfaces as [`AdminShopifyError::RateLimited`]
//!
//! # Example
//!
//! ```rust,ignore
//! use product_desk_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify);
//!
//! let products = client.fetch_products(Some("shirt")).await?;
//! client.delete_product(&products[0].id).await?;
//! ```

mod admin;

pub use admin::{AdminClient, TitleAndPriceUpdate, escape_search_term};

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status other than 401/429.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User error from mutation (e.g., invalid input).
    #[error("User error: {0}")]
    UserError(String),

    /// Response data could not be normalized.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(error: graphql_client::Error) -> Self {
        Self {
            message: error.message,
            path: error.path.map_or_else(Vec::new, |p| {
                p.into_iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                        graphql_client::PathFragment::Index(i) => {
                            serde_json::Value::Number(i.into())
                        }
                    })
                    .collect()
            }),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
