//! Error types for stay-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StayError {
    /// A date string that is neither `YYYY-MM-DD` nor an ISO 8601 timestamp.
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// A booking window whose check-out is not strictly after its check-in.
    #[error("Invalid booking window: check-out {to} must be after check-in {from}")]
    InvalidWindow { from: String, to: String },

    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, StayError>;
