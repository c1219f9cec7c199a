//! Error types and exit codes for Frontfill.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const CONFIGURATION_ERROR: i32 = 2;
    pub const MALFORMED_MODEL_OUTPUT: i32 = 3;
}

/// Main error type for Frontfill operations.
#[derive(Error, Debug)]
pub enum FrontfillError {
    #[error("Malformed model output: {message}; offending text: {text}")]
    MalformedModelOutput { message: String, text: String },

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Completion request failed: {0}")]
    Completion(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown placeholder in prompt template: {0:?}")]
    UnknownPlaceholder(String),

    #[error("Source folder not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FrontfillError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FrontfillError::Configuration(_) => exit_code::CONFIGURATION_ERROR,
            FrontfillError::MalformedModelOutput { .. } => exit_code::MALFORMED_MODEL_OUTPUT,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for Frontfill operations.
pub type Result<T> = std::result::Result<T, FrontfillError>;
