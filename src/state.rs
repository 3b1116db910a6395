use std::sync::Arc;

use crate::extractor::MetadataExtractor;

/// Shared application state passed to all handlers.
/// The extractor is built once at startup so its HTTP connection pool is
/// reused across requests.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn MetadataExtractor>,
}

impl AppState {
    pub fn new(extractor: impl MetadataExtractor + 'static) -> Self {
        AppState {
            extractor: Arc::new(extractor),
        }
    }
}
