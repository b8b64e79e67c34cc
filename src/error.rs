//! Error types for the portfolio pages
//!
//! Uses thiserror for ergonomic error definitions.
//! Row-level problems (`MissingField`, `ShapeMismatch`) are reported by the
//! renderers and logged by the caller, they never fail a page.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A required key is absent from a record
    #[error("Missing field '{field}' in row {row}")]
    MissingField { field: String, row: usize },

    /// A record or column does not match the shape set by the first one
    #[error("Shape mismatch in row {row}: expected {expected}, found {found}")]
    ShapeMismatch {
        row: usize,
        expected: String,
        found: String,
    },

    /// Link whose scheme is not http(s)
    #[error("Unsafe link in row {row}: '{url}'")]
    UnsafeLink { row: usize, url: String },

    /// Date text that is neither `%Y-%m-%d` nor `%Y-%m-%d %H:%M`
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Form input that does not parse as a number
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Page name with no renderer
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DashboardError {
    /// True for problems confined to a single row or option
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            DashboardError::MissingField { .. }
                | DashboardError::ShapeMismatch { .. }
                | DashboardError::UnsafeLink { .. }
        )
    }
}

impl From<worker::Error> for DashboardError {
    fn from(err: worker::Error) -> Self {
        DashboardError::Worker(err.to_string())
    }
}

impl From<DashboardError> for worker::Error {
    fn from(err: DashboardError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}
