use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading or validating a tool catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog JSON could not be decoded
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Catalog TOML could not be decoded
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Catalog file extension is neither `.json` nor `.toml`
    #[error("Unsupported catalog format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Two tools share the same slug
    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),

    /// Slug is empty or not URL-safe
    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    /// A required field is blank
    #[error("Tool {slug:?} has an empty {field}")]
    EmptyField { slug: String, field: &'static str },
}

impl CatalogError {
    pub fn empty_field(slug: impl Into<String>, field: &'static str) -> Self {
        Self::EmptyField {
            slug: slug.into(),
            field,
        }
    }
}
