//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health   - Liveness check (public)
//! GET  /         - Product page
//! POST /page     - Page event (HTMX), answers with the page partial
//! POST /         - Action endpoint (fetchProducts, updateProduct, delete)
//! ```
//!
//! Everything except `/health` requires a Shopify session token.

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod products;

/// Build the authenticated routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::action))
        .route("/page", post(products::event))
}
