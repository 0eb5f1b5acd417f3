use crate::api::AppState;
use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use opentelemetry::KeyValue;
use serde_json::json;

const THROTTLED_MESSAGE: &str = "Too many requests, please try again later";

/// Sits just outside the governor: counts every decision it made, allowed or throttled,
/// and replaces its plain-text 429 with a JSON body that keeps the retry hint.
pub async fn record_rate_limit_decision(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        state.rate_limit_decisions.add(1, &[KeyValue::new("status", "allowed")]);
        return response;
    }

    state.rate_limit_decisions.add(1, &[KeyValue::new("status", "throttled")]);

    let retry_after = response
        .headers()
        .get("x-ratelimit-after")
        .or_else(|| response.headers().get(header::RETRY_AFTER))
        .cloned();
    tracing::warn!(
        retry_after_secs = retry_after.as_ref().and_then(|v| v.to_str().ok()).unwrap_or("unknown"),
        "Contact form rate limit exceeded"
    );

    let mut throttled = (StatusCode::TOO_MANY_REQUESTS, Json(json!({ "error": THROTTLED_MESSAGE }))).into_response();
    if let Some(after) = retry_after {
        throttled.headers_mut().insert(header::RETRY_AFTER, after);
    }
    throttled
}

