use crate::api::AppState;
use crate::api::schemas::contact::{BOT_ACK_MESSAGE, ContactRequest, MessageResponse, THANK_YOU_MESSAGE};
use crate::domain::submission::{Acceptance, Outcome, RejectionReason};
use crate::error::{AppError, Result};
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

/// Handles a contact form post.
///
/// The body is buffered and parsed by hand so that every failure, including an
/// oversized or malformed payload, answers with a JSON body.
///
/// # Errors
/// Returns `AppError::Rejected` when validation fails or the body exceeds the size limit,
/// `AppError::MalformedBody` when the body is not JSON, and `AppError::Internal` when it is `null`.
pub async fn submit(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::Rejected(RejectionReason::MessageTooLong)
        } else {
            AppError::Body(rejection)
        }
    })?;

    let payload = ContactRequest::from_body(serde_json::from_slice::<Value>(&body)?)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("request body is JSON null")))?;

    match state.contact_service.submit(payload.into()).await? {
        Outcome::Accepted(Acceptance::Suppressed) => Ok(Json(MessageResponse::new(BOT_ACK_MESSAGE))),
        Outcome::Accepted(Acceptance::Recorded(_)) => Ok(Json(MessageResponse::new(THANK_YOU_MESSAGE))),
        Outcome::Rejected(reason) => Err(AppError::Rejected(reason)),
    }
}
