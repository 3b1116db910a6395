pub mod metadata;

use crate::error::{AppError, AppResult};

/// Fallback for every unmatched path or method.
pub async fn not_found() -> AppResult<()> {
    Err(AppError::NotFound)
}
