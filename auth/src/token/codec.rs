use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::TokenError;

/// Refresh tokens always live this long, independent of the access TTL.
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Signs, encodes, decodes, and validates bearer tokens.
///
/// Uses a symmetric secret with an HMAC-family algorithm (HS256 by
/// default). The codec does not enforce secret length; treating a short
/// secret as a fatal misconfiguration is the caller's job at startup.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec signing with HS256.
    ///
    /// # Arguments
    /// * `secret` - Signing secret; at least 32 bytes in any production setup
    pub fn new(secret: &[u8]) -> Self {
        Self::with_algorithm(secret, Algorithm::HS256)
    }

    /// Create a codec with an explicit signing algorithm.
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        }
    }

    /// Issue an access token for a subject.
    ///
    /// Embeds `email` and `role` when given, issued-at = now and
    /// expiry = now + `ttl`, both at one-second resolution.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token could not be signed/encoded
    pub fn issue_access(
        &self,
        subject: &str,
        email: Option<String>,
        role: Option<String>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        self.encode(&Claims {
            sub: subject.to_string(),
            email,
            role,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            kind: TokenKind::Access,
        })
    }

    /// Issue a refresh token for a subject, valid for 7 days.
    ///
    /// Refresh tokens carry the subject only; no email or role.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token could not be signed/encoded
    pub fn issue_refresh(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        self.encode(&Claims {
            sub: subject.to_string(),
            email: None,
            role: None,
            exp: (now + Duration::days(REFRESH_TOKEN_TTL_DAYS)).timestamp(),
            iat: now.timestamp(),
            kind: TokenKind::Refresh,
        })
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode a token, verifying its signature and expiry.
    ///
    /// Expiry is exclusive: a token presented at exactly its `exp` instant
    /// is already expired. Kind is not checked here; see [`Self::require_kind`].
    ///
    /// # Errors
    /// * `Invalid` - Bad signature, malformed token, or expired
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below so the exclusive comparison lives in
        // one place, without jsonwebtoken's default leeway.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?;

        if Utc::now().timestamp() >= data.claims.exp {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }

    /// Fail unless the claim set carries the expected token kind.
    ///
    /// # Errors
    /// * `Invalid` - Kind mismatch
    pub fn require_kind(claims: &Claims, expected: TokenKind) -> Result<(), TokenError> {
        if claims.kind == expected {
            Ok(())
        } else {
            Err(TokenError::Invalid)
        }
    }
}
