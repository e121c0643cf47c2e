//! Error types for the Neulish engine
//!
//! The recommendation, normalization and aggregation functions are total and never
//! return these. Errors only surface at the JSON boundary, where a payload can be
//! syntactically broken or have the wrong top-level shape.

use thiserror::Error;

/// Errors that can occur while decoding requests or encoding responses
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
