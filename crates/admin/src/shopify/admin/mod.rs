//! Shopify Admin API GraphQL client.
//!
//! Authenticates every request with the store's Admin API access token
//! (`X-Shopify-Access-Token`).

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::ShopifyAdminConfig;

use super::{AdminShopifyError, GraphQLError};

mod conversions;
mod products;
pub mod queries;

pub use products::{TitleAndPriceUpdate, escape_search_term};

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; clones share one pooled `reqwest::Client`.
///
/// # Security
///
/// This client holds the Admin API access token, which has HIGH PRIVILEGE
/// access to the store.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    store: String,
    endpoint: String,
    access_token: SecretString,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("store", &self.inner.store)
            .field("endpoint", &self.inner.endpoint)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl AdminClient {
    /// Create a new Admin API client for the configured store.
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        Self::with_endpoint(config, config.graphql_endpoint())
    }

    /// Create a client that posts to `endpoint` instead of the store's
    /// GraphQL URL. Used to point the client at a local stand-in.
    #[must_use]
    pub fn with_endpoint(config: &ShopifyAdminConfig, endpoint: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                store: config.store.clone(),
                endpoint: endpoint.into(),
                access_token: config.access_token.clone(),
            }),
        }
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Post one operation and return the raw GraphQL envelope.
    ///
    /// HTTP-level failures are errors; GraphQL `errors` are left in the
    /// envelope for the caller.
    async fn send<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Response<Q::ResponseData>, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(2);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify Admin API returned non-success status"
            );
            return Err(AdminShopifyError::Status(status.as_u16()));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse Shopify Admin GraphQL response"
            );
            AdminShopifyError::Parse(e)
        })
    }

    /// Execute a GraphQL operation, treating any top-level error as failure.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let response = self.send::<Q>(variables).await?;

        // Check for GraphQL errors
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");
            return Err(AdminShopifyError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                    path: vec![],
            }])
        })
    }
}
