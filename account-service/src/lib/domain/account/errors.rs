use std::fmt;

use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid account id: {0}")]
    InvalidFormat(String),
}

/// Error for FullName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("Full name cannot be empty")]
    Empty,

    #[error("Full name must be 2-255 characters, got {0}")]
    InvalidLength(usize),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0} (expected student, mentor, or admin)")]
    Unknown(String),
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },
}

/// A single violated input field with its human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: String) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Malformed input or business-rule violation.
///
/// Recoverable by the caller correcting input; carries a message and
/// optional field-level detail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            violations: Vec::new(),
        }
    }

    pub fn from_violations(violations: Vec<FieldViolation>) -> Self {
        let message = violations
            .iter()
            .map(FieldViolation::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            message,
            violations,
        }
    }
}

/// Registry-level errors for account persistence.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    /// An account with this email already exists, whether caught by the
    /// pre-insert lookup or by the storage uniqueness constraint.
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(String),
}

/// Workflow-boundary error taxonomy.
///
/// Everything below the authentication workflow is translated into one of
/// these before reaching a caller; raw storage or library error text never
/// crosses this boundary for the credential/token variants.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Uniform outcome for unknown email, wrong password, and inactive
    /// account; the message never varies between those sub-cases.
    #[error("Invalid email or password")]
    AuthenticationFailed,

    /// Uniform outcome for signature failure, decode failure, expiry,
    /// and kind mismatch.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
