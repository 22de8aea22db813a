//! Product page, page events and action endpoint.

use askama::Template;
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Html,
};
use tracing::instrument;

use product_desk_core::action::{ActionForm, ActionRequest, ActionResponse};
use product_desk_core::page::{Notification, PageView};

use crate::{
    actions, error::AppError, middleware::auth::RequireSessionToken, page::PageEventForm,
    state::AppState,
};

// =============================================================================
// Templates
// =============================================================================

/// Full product page.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    /// App API key for App Bridge.
    pub api_key: String,
    pub store: String,
    pub view: PageView,
    pub notifications: Vec<Notification>,
}

/// Page body partial (HTMX swap).
#[derive(Template)]
#[template(path = "products/_page.html")]
pub struct ProductsPagePartial {
    pub view: PageView,
    pub notifications: Vec<Notification>,
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Template render error: {}", e);
        AppError::Internal(format!("template render failed: {e}"))
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Product page handler.
///
/// Renders this session's page as it stands; a fresh session shows the
/// empty list until the user asks for products.
#[instrument(skip_all)]
pub async fn index(
    RequireSessionToken(claims): RequireSessionToken,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let page = state.pages().get(claims.session_key()).await;
    let view = page.lock().await.view();

    render(&ProductsIndexTemplate {
        api_key: state.config().app.api_key.clone(),
        store: state.config().shopify.store.clone(),
        view,
        notifications: Vec::new(),
    })
}

/// Page event handler (HTMX).
///
/// Applies one user intent to the session's page, runs whatever it
/// submits, and answers with the re-rendered page body and its toasts.
#[instrument(skip_all, fields(event = tracing::field::Empty))]
pub async fn event(
    RequireSessionToken(claims): RequireSessionToken,
    State(state): State<AppState>,
    form: Result<Form<PageEventForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(|e| {
        tracing::warn!(error = %e, "Unreadable page event form");
        AppError::BadForm(e)
    })?;
    tracing::Span::current().record("event", form.event.as_str());

    let events = form.into_events().map_err(|e| {
        tracing::warn!(error = %e, "Rejected page event");
        AppError::BadEvent(e)
    })?;

    let page = state.pages().get(claims.session_key()).await;
    let mut page = page.lock().await;
    let mut notifications = Vec::new();
    crate::page::run(state.shopify(), &mut page, events, &mut notifications).await;

    render(&ProductsPagePartial {
        view: page.view(),
        notifications,
    })
}

/// Action endpoint handler.
///
/// Validates one form submission and runs exactly one Admin API operation.
#[instrument(skip_all)]
pub async fn action(
    RequireSessionToken(_claims): RequireSessionToken,
    State(state): State<AppState>,
    form: Result<Form<ActionForm>, FormRejection>,
) -> Result<Json<ActionResponse>, AppError> {
    let Form(form) = form.map_err(|e| {
        tracing::warn!(error = %e, "Unreadable action form");
        AppError::BadForm(e)
    })?;

    let request = ActionRequest::try_from(form).map_err(|e| {
        tracing::warn!(error = %e, "Rejected action");
        AppError::Validation(e)
    })?;

    actions::perform(state.shopify(), request).await.map(Json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use product_desk_core::page::ProductPage;

    use super::*;

    #[test]
    fn test_index_template_renders_empty_state() {
        let html = ProductsIndexTemplate {
            api_key: "app-key".to_string(),
            store: "desk-test.myshopify.com".to_string(),
            view: ProductPage::new().view(),
            notifications: Vec::new(),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"<meta name="shopify-api-key" content="app-key""#));
        assert!(html.contains(r#"hx-post="/page""#));
        assert!(html.contains(r#"value="fetch""#));
        assert!(html.contains("Display Products"));
        assert!(html.contains("No products found"));
        assert!(!html.contains("<p data-toast"));
    }

    #[test]
    fn test_partial_renders_toasts_and_closed_modals() {
        let html = ProductsPagePartial {
            view: ProductPage::new().view(),
            notifications: vec![
                Notification::info("Products fetched"),
                Notification::error("Error: <b>Invalid</b> price"),
            ],
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"id="page""#));
        assert!(html.contains(r#"data-level="info""#));
        assert!(html.contains(r#"data-level="error" data-duration="5000""#));
        assert!(html.contains("Products fetched"));
        assert!(!html.contains("<b>Invalid</b>"));
        assert!(!html.contains(r#"id="update-modal""#));
        assert!(!html.contains(r#"id="delete-modal""#));
    }
}
