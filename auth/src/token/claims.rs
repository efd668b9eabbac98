use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Discriminates the two token flavors issued per login event.
///
/// Serialized as the `type` claim (`"access"` / `"refresh"`); the two are
/// never interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claim set carried by every issued token.
///
/// The wire layout is fixed: `sub`, optional `email`/`role` (set on access
/// tokens only), `exp` and `iat` as epoch seconds, and `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (string-encoded account id)
    pub sub: String,

    /// Account email, access tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Account role, access tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Expiration time (Unix timestamp, exclusive)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Token kind
    #[serde(rename = "type")]
    pub kind: TokenKind,
}
