use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MAX_URL_LENGTH: u64 = 2048;

/// Page metadata returned by `GET /`.
///
/// Every field is optional and serialized as `null` when the page does not
/// provide it, so the response always carries the same six keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub language: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
}

/// Query string accepted by `GET /`.
#[derive(Debug, Deserialize, Validate)]
pub struct MetadataQuery {
    #[validate(
        required(message = "url is required"),
        url(message = "Invalid url"),
        length(max = 2048, message = "url must be at most 2048 characters")
    )]
    pub url: Option<String>,
}

impl MetadataQuery {
    /// Strip surrounding whitespace from `url` before validation.
    pub fn trimmed(self) -> Self {
        MetadataQuery {
            url: self.url.map(|u| u.trim().to_string()),
        }
    }
}
