use crate::api::rate_limit::record_rate_limit_decision;
use crate::config::Config;
use crate::services::client_ip::ClientIp;
use crate::services::contact_service::ContactService;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Request};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use opentelemetry::{global, metrics::Counter};
use std::sync::Arc;
use std::time::Duration;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod contact;
pub mod health;
pub mod middleware;
pub mod rate_limit;
pub mod schemas;

fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub contact_service: ContactService,
    pub rate_limit_decisions: Counter<u64>,
}

#[derive(Debug)]
pub struct ServiceContainer {
    pub contact_service: ContactService,
    pub client_ip: ClientIp,
}

/// Builds the public router: the contact form route behind a per-visitor limiter,
/// wrapped in request ids, tracing, panic recovery and the body size limit.
///
/// # Panics
/// Panics if the rate limiter configuration cannot be constructed or the configured
/// route is not a valid path.
pub fn app_router(config: &Config, services: ServiceContainer) -> Router {
    let state = AppState {
        contact_service: services.contact_service,
        rate_limit_decisions: global::meter("site-contact")
            .u64_counter("rate_limit_decisions_total")
            .with_description("Contact form rate limit decisions (allowed/throttled)")
            .build(),
    };

    let per_second = config.rate_limit.per_second.max(1);
    let limiter = Arc::new(
        GovernorConfigBuilder::default()
            .per_nanosecond(1_000_000_000 / u64::from(per_second))
            .burst_size(config.rate_limit.burst.max(1))
            .key_extractor(services.client_ip)
            .finish()
            .expect("Failed to build contact rate limiter config"),
    );

    let contact_route = Router::new()
        .route(&config.contact.route, post(contact::submit))
        .layer(GovernorLayer::new(limiter))
        .layer(from_fn_with_state(state.clone(), record_rate_limit_decision));

    let traced = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .extensions()
                .get::<RequestId>()
                .and_then(|id| id.header_value().to_str().ok())
                .unwrap_or_default()
                .to_owned();

            tracing::info_span!(
                "contact_request",
                "request_id" = %request_id,
                "http.request.method" = %request.method(),
                "url.path" = %request.uri().path(),
                "http.response.status_code" = tracing::field::Empty,
                "otel.kind" = "server",
            )
        })
        .on_response(|response: &axum::http::Response<_>, latency: Duration, span: &tracing::Span| {
            let status = response.status().as_u16();
            span.record("http.response.status_code", status);
            tracing::info!(latency_ms = %latency.as_millis(), status, "request completed");
        })
        .on_failure(|error, _latency, _span: &tracing::Span| {
            tracing::error!(error = %error, "request failed");
        });

    contact_route
        .layer(DefaultBodyLimit::max(config.contact.max_body_bytes))
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(traced)
        .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
        .with_state(state)
}

/// Router for the management port; only liveness, no contact traffic.
pub fn mgmt_router() -> Router {
    Router::new().route("/livez", get(health::livez))
}
