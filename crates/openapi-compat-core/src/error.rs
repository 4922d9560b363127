//! Error types for contract loading.
//!
//! Only structural failures to read a document are errors. Compatibility
//! violations are ordinary data, see [`crate::violation`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompatError {
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid contract document: {message}")]
    InvalidDocument { message: String },
}
