pub mod encoding;
pub mod html;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::models::PageMetadata;

pub use encoding::{charset_from_content_type, decode_body};
pub use html::extract_metadata;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// DNS failure, refused connection, timeout or any other request-level
    /// failure before a response arrived.
    #[error("Failed to reach host: {0}")]
    Host(String),

    #[error("Upstream responded with status {0}")]
    Status(u16),

    /// The request could not be sent or followed, e.g. a redirect loop.
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Response body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ExtractError {
    pub fn is_host_error(&self) -> bool {
        matches!(self, ExtractError::Host(_))
    }

    /// Classify an error returned by `RequestBuilder::send`.
    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            ExtractError::Host(err.to_string())
        } else {
            ExtractError::Request(err.to_string())
        }
    }
}

/// Fetches a page and turns it into [`PageMetadata`].
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, url: &Url) -> Result<PageMetadata, ExtractError>;
}

/// Default extractor: one GET with reqwest, parsed with scraper.
#[derive(Clone, Debug)]
pub struct HttpExtractor {
    client: ReqwestClient,
    max_body_bytes: usize,
}

impl HttpExtractor {
    pub fn new(
        timeout: Duration,
        user_agent: &str,
        max_body_bytes: usize,
    ) -> Result<Self, ExtractError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ExtractError::Client(e.to_string()))?;
        Ok(HttpExtractor {
            client,
            max_body_bytes,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ExtractError> {
        Self::new(
            config.fetch_timeout,
            &config.user_agent,
            config.max_body_bytes,
        )
    }
}

#[async_trait]
impl MetadataExtractor for HttpExtractor {
    async fn extract(&self, url: &Url) -> Result<PageMetadata, ExtractError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(ExtractError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_body_bytes as u64 {
                return Err(ExtractError::TooLarge {
                    limit: self.max_body_bytes,
                });
            }
        }

        // Relative links resolve against where redirects actually landed.
        let final_url = response.url().clone();
        let charset = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type);

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            if e.is_timeout() {
                ExtractError::Host(e.to_string())
            } else {
                ExtractError::Body(e.to_string())
            }
        })? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(ExtractError::TooLarge {
                    limit: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        let html = decode_body(&body, charset.as_deref());
        tracing::debug!(url = %final_url, bytes = body.len(), charset = ?charset, "Fetched page");

        Ok(extract_metadata(&html, &final_url))
    }
}
