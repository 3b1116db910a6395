use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use url::Url;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{MetadataQuery, PageMetadata};
use crate::state::AppState;

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /?url=<encoded-url>
///
/// Fetches the page at `url` and returns its title, language, keywords,
/// description, icon and preview image. Unreachable hosts are a 400.
pub async fn get_metadata(
    State(state): State<AppState>,
    query: Result<Query<MetadataQuery>, QueryRejection>,
) -> AppResult<Json<PageMetadata>> {
    let Query(query) = query.map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed query string");
        AppError::Validation("Invalid query string".into())
    })?;

    // ── Validate URL ──────────────────────────────────────────────────────
    let query = query.trimmed();
    query.validate()?;

    let url_str = query
        .url
        .ok_or_else(|| AppError::Validation("url is required".into()))?;
    let url = Url::parse(&url_str).map_err(|_| AppError::Validation("Invalid url".into()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(AppError::Validation("Invalid url".into())),
    }

    // ── Fetch and parse ───────────────────────────────────────────────────
    let metadata = state.extractor.extract(&url).await?;

    tracing::debug!(url = %url, title = ?metadata.title, "Extracted page metadata");

    Ok(Json(metadata))
}

// ── Unit tests ─────────────────────────────────────────────────────────────
