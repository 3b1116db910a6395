pub mod metadata;

pub use metadata::{MetadataQuery, PageMetadata, MAX_URL_LENGTH};
