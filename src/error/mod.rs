use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

use crate::extractor::ExtractError;

pub const ERROR_NAME: &str = "HttpException";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid host")]
    InvalidHost,

    #[error("Not found")]
    NotFound,

    #[error("Unclassified error: {0}")]
    Unclassified(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidHost => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The client-facing message. Unclassified errors never leak their detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidHost => "Invalid host".into(),
            AppError::NotFound | AppError::Unclassified(_) => {
                reason_phrase(self.status()).to_string()
            }
        }
    }
}

fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Error")
}

/// Take the first message the validator produced; fall back to a generic one
/// for rules declared without a message.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::Validation(message)
    }
}

/// Host and request-level fetch failures are the caller's fault (400);
/// everything else is unclassified.
impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        if e.is_host_error() {
            tracing::warn!(error = %e, "Target host could not be reached");
            AppError::InvalidHost
        } else {
            AppError::Unclassified(Box::new(e))
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
    pub status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unclassified(ref e) = self {
            tracing::error!(error = ?e, "Unhandled error");
        }

        let status = self.status();
        let envelope = ErrorEnvelope {
            error: ErrorBody {
                name: ERROR_NAME.to_string(),
                message: self.public_message(),
                status: status.as_u16(),
            },
        };

        (status, Json(envelope)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
