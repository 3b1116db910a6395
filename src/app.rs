use axum::{
    http::{HeaderName, HeaderValue},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::handlers;
use crate::state::AppState;

/// Security headers attached to every response unless a handler already set them.
pub const SECURE_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("referrer-policy", "no-referrer"),
    (
        "strict-transport-security",
        "max-age=15552000; includeSubDomains",
    ),
    ("x-xss-protection", "0"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-permitted-cross-domain-policies", "none"),
    ("cross-origin-resource-policy", "same-origin"),
    ("cross-origin-opener-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
];

/// Build the full application router: the metadata route, the 404 fallback,
/// and the CORS, secure-headers and request-logging layers.
pub fn create_app(state: AppState) -> Router {
    let mut app = Router::new()
        .route(
            "/",
            get(handlers::metadata::get_metadata).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .with_state(state);

    for (name, value) in SECURE_HEADERS {
        app = app.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(*name),
            HeaderValue::from_static(*value),
        ));
    }

    app.layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}
