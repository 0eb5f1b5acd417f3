use crate::error::INTERNAL_ERROR_MESSAGE;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::any::Any;

/// Converts a handler panic into the generic JSON 500 response.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(panic = %detail, code = "INTERNAL_ERROR", "Contact form error: handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": INTERNAL_ERROR_MESSAGE }))).into_response()
}
