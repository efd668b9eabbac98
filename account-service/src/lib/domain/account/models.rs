use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountIdError;
use crate::account::errors::EmailError;
use crate::account::errors::FieldViolation;
use crate::account::errors::FullNameError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::RoleError;
use crate::account::errors::ValidationError;

/// Account aggregate entity.
///
/// Represents a registered account as persisted, including its
/// storage-assigned identifier and timestamps.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account unique identifier, assigned by storage on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub i64);

impl AccountId {
    /// Parse an account id from its string form (e.g. a token subject).
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid integer id
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        s.parse::<i64>()
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account role carried into access-token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Mentor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Mentor => "mentor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "mentor" => Ok(Role::Mentor),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Full name value type
///
/// Trimmed on construction; must be 2-255 characters afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 255;

    /// Create a validated full name.
    ///
    /// # Errors
    /// * `Empty` - Nothing left after trimming
    /// * `InvalidLength` - Outside 2-255 characters
    pub fn new(full_name: String) -> Result<Self, FullNameError> {
        let trimmed = full_name.trim();
        if trimmed.is_empty() {
            return Err(FullNameError::Empty);
        }
        let length = trimmed.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(FullNameError::InvalidLength(length));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates shape via an RFC 5322 compliant parser; stored and compared
/// case-sensitively as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

const MIN_PASSWORD_CHARS: usize = 8;

/// Command to register a new account, shape-validated on construction.
#[derive(Debug)]
pub struct SignupCommand {
    pub full_name: FullName,
    pub email: EmailAddress,
    pub password: String,
    pub role: Role,
}

impl SignupCommand {
    /// Validate raw signup input into a command.
    ///
    /// All violated fields are collected into a single `ValidationError`
    /// rather than failing on the first one.
    pub fn new(
        full_name: String,
        email: String,
        password: String,
        role: String,
    ) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        let full_name = FullName::new(full_name)
            .map_err(|e| violations.push(FieldViolation::new("full_name", e.to_string())))
            .ok();
        let email = EmailAddress::new(email)
            .map_err(|e| violations.push(FieldViolation::new("email", e.to_string())))
            .ok();
        if password.chars().count() < MIN_PASSWORD_CHARS {
            violations.push(FieldViolation::new(
                "password",
                PasswordPolicyError::TooShort {
                    min: MIN_PASSWORD_CHARS,
                }
                .to_string(),
            ));
        }
        let role = role
            .parse::<Role>()
            .map_err(|e| violations.push(FieldViolation::new("role", e.to_string())))
            .ok();

        match (full_name, email, role) {
            (Some(full_name), Some(email), Some(role)) if violations.is_empty() => Ok(Self {
                full_name,
                email,
                password,
                role,
            }),
            _ => Err(ValidationError::from_violations(violations)),
        }
    }
}

/// Command to authenticate with stored credentials.
///
/// Carries the raw input untouched: a malformed email simply fails the
/// lookup, which keeps login outcomes uniform.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Fields of a new account handed to the registry; the identifier, flags,
/// and timestamps are assigned at the storage boundary.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub full_name: FullName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
}

/// Access + refresh token pair issued from one authentication event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds
    pub expires_in: i64,
}

/// Successful signup/login outcome.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub account: Account,
    pub tokens: TokenPair,
}
