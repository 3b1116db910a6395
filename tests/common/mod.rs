// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

use page_meta_server::{
    app::create_app,
    extractor::{ExtractError, HttpExtractor, MetadataExtractor},
    models::PageMetadata,
    state::AppState,
};

/// What the stub extractor should do when called.
#[derive(Clone)]
pub enum Outcome {
    Metadata(PageMetadata),
    HostError,
    UpstreamStatus(u16),
}

/// In-memory extractor that never touches the network and counts its calls.
#[derive(Clone)]
pub struct StubExtractor {
    outcome: Outcome,
    calls: Arc<AtomicUsize>,
}

impl StubExtractor {
    pub fn new(outcome: Outcome) -> Self {
        StubExtractor {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataExtractor for StubExtractor {
    async fn extract(&self, _url: &Url) -> Result<PageMetadata, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Metadata(meta) => Ok(meta.clone()),
            Outcome::HostError => Err(ExtractError::Host("dns error: no such host".into())),
            Outcome::UpstreamStatus(code) => Err(ExtractError::Status(*code)),
        }
    }
}

pub fn example_metadata() -> PageMetadata {
    PageMetadata {
        title: Some("Example Domain".into()),
        language: Some("en".into()),
        keywords: Some(vec!["example".into(), "domain".into()]),
        description: Some("This domain is for use in illustrative examples.".into()),
        icon: Some("https://example.com/favicon.ico".into()),
        image: None,
    }
}

/// Build the full application router around a stub extractor.
pub fn create_test_app(stub: StubExtractor) -> Router {
    create_app(AppState::new(stub))
}

/// Build the full application router around the real reqwest extractor.
pub fn create_http_app(max_body_bytes: usize) -> Router {
    create_http_app_with_timeout(Duration::from_secs(2), max_body_bytes)
}

pub fn create_http_app_with_timeout(timeout: Duration, max_body_bytes: usize) -> Router {
    let extractor = HttpExtractor::new(timeout, "PageMetaTest/1.0", max_body_bytes)
        .expect("Failed to build HTTP extractor");
    create_app(AppState::new(extractor))
}

/// Percent-encode a target URL for use as the `url` query value.
pub fn metadata_uri(target: &str) -> String {
    let mut uri = Url::parse("http://localhost/").unwrap();
    uri.query_pairs_mut().append_pair("url", target);
    format!("/?{}", uri.query().unwrap_or_default())
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get_with_headers(app, uri).await;
    (status, body)
}

pub async fn get_with_headers(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ORIGIN, "https://client.example")
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn request(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app, req).await;
    (status, body)
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
}

/// Assert `body` is the standard error envelope with the given status and message.
pub fn assert_error_envelope(body: &Value, status: StatusCode, message: &str) {
    assert_eq!(
        body,
        &serde_json::json!({
            "error": {
                "name": "HttpException",
                "message": message,
                "status": status.as_u16(),
            }
        }),
        "unexpected error body"
    );
}
