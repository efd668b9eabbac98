use thiserror::Error;

/// Error type for token operations.
///
/// All validation failures (bad signature, malformed token, expiry, wrong
/// kind) collapse into the single `Invalid` variant so callers cannot
/// distinguish why a presented token was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid or expired token")]
    Invalid,
}
