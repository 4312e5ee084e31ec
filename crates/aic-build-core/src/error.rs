//! Error types for aic-build-core

use thiserror::Error;

/// Result type alias using aic-build-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the build orchestrator
#[derive(Error, Debug)]
pub enum Error {
    /// Template document not found
    #[error("Template document not found: {path}")]
    TemplatesNotFound { path: String },

    /// Selected profile name absent from its template category
    #[error("Unknown {category} profile: {name}")]
    UnknownProfile { category: &'static str, name: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

impl Error {
    /// Create a templates not found error
    pub fn templates_not_found(path: impl Into<String>) -> Self {
        Self::TemplatesNotFound { path: path.into() }
    }

    /// Create an unknown profile error
    pub fn unknown_profile(category: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownProfile {
            category,
            name: name.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}
