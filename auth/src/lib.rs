//! Authentication primitives library
//!
//! Provides the credential-handling building blocks for the account service:
//! - Password hashing and verification (bcrypt)
//! - Signed bearer-token issuance and validation (JWT, access + refresh)
//!
//! This crate is deliberately free of I/O and persistence concerns; the
//! service crate wires these primitives into its domain workflows.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenCodec, TokenKind};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec
//!     .issue_access("7", Some("alice@example.com".into()), Some("student".into()), Duration::minutes(30))
//!     .unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.sub, "7");
//! TokenCodec::require_kind(&claims, TokenKind::Access).unwrap();
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenKind;
