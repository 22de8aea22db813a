//! Unified error handling for the action and page endpoints.
//!
//! Every error answers with the `{error}` JSON body. Page events convert
//! errors into a failed [`ActionResponse`] instead, so the page can show
//! them as a toast.

use axum::{
    Json,
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use product_desk_core::action::{ActionRequestError, ActionResponse, GENERIC_FAILURE_MESSAGE};

use crate::page::PageEventError;
use crate::shopify::AdminShopifyError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submission failed validation; nothing was sent to Shopify.
    #[error(transparent)]
    Validation(#[from] ActionRequestError),

    /// Body was not a readable urlencoded form.
    #[error("Invalid form: {0}")]
    BadForm(#[from] FormRejection),

    /// Page event form named an unknown event or lacked a field.
    #[error("Invalid page event: {0}")]
    BadEvent(#[from] PageEventError),

    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// Missing or invalid session token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadForm(_) | Self::BadEvent(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Shopify(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Capture server errors in Sentry and the log. Client errors are
    /// logged by the handler that rejected them.
    pub fn report(&self) {
        if matches!(self, Self::Shopify(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Action request error"
            );
        }
    }

    /// Message safe to show the merchant.
    #[must_use]
    pub fn client_message(&self) -> String {
        // Don't expose remote error details to clients
        match self {
            Self::Shopify(_) | Self::Internal(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::Validation(e) => e.to_string(),
            Self::BadForm(_) => "Invalid form".to_string(),
            Self::BadEvent(e) => e.to_string(),
            Self::Unauthorized(_) => "Unauthorized".to_string(),
        }
    }

    /// Report and turn into the `{error}` body the page consumes.
    #[must_use]
    pub fn into_failure(self) -> ActionResponse {
        self.report();
        ActionResponse::Failure {
            error: self.client_message(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.into_failure())).into_response()
    }
}
