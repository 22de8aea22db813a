//! Application state shared across handlers.

use std::sync::Arc;

use crate::{config::AdminConfig, page::PageSessions, shopify::AdminClient};

/// Application state shared across all handlers.
///
/// Cloning is cheap; all clones share one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    shopify: AdminClient,
    pages: PageSessions,
}

impl AppState {
    /// Build state with a client for the configured store.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let shopify = AdminClient::new(&config.shopify);
        Self::with_client(config, shopify)
    }

    /// Build state around an existing client.
    #[must_use]
    pub fn with_client(config: AdminConfig, shopify: AdminClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                pages: PageSessions::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    /// Server-held page controllers.
    #[must_use]
    pub fn pages(&self) -> &PageSessions {
        &self.inner.pages
    }
}
