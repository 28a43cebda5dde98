use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid scope label '{label}': {reason}")]
    InvalidScopeLabel { label: String, reason: String },

    #[error("invalid method name '{name}': {reason}")]
    InvalidMethodName { name: String, reason: String },
}
