use crate::domain::submission::RejectionReason;
use crate::services::notifier::NotifyError;
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred processing your request";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Submission rejected: {0}")]
    Rejected(RejectionReason),
    #[error("Failed to read request body: {0}")]
    Body(BytesRejection),
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Machine-readable code for the error taxonomy.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Rejected(reason) => reason.code(),
            Self::Body(_) | Self::MalformedBody(_) | Self::Notify(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Rejected(reason) => (StatusCode::BAD_REQUEST, reason.message()),
            Self::Body(e) => {
                tracing::error!(error = %e, code = self.code(), "Contact form error: unreadable body");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            Self::MalformedBody(e) => {
                tracing::error!(error = %e, code = self.code(), "Contact form error: malformed body");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            Self::Notify(e) => {
                tracing::error!(error = %e, code = self.code(), "Contact form error: notifier failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, code = self.code(), "Contact form error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
