use bcrypt::DEFAULT_COST;

use super::errors::PasswordError;

/// bcrypt ignores everything past this many bytes of input. Truncating
/// explicitly keeps `hash` and `verify` agreeing on the effective input.
const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing implementation.
///
/// Wraps bcrypt with a tunable cost factor and a random salt per call.
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the default cost factor.
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a hasher with an explicit cost factor.
    ///
    /// Lower costs are only appropriate for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password for storage.
    ///
    /// The input is truncated to 72 bytes before hashing; bytes beyond
    /// that contribute nothing to a bcrypt hash. This is an accepted
    /// limitation of the algorithm, not something to work around.
    ///
    /// # Errors
    /// * `HashingFailed` - The hashing operation itself failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(truncate(password), self.cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns `false` for mismatches and for malformed or undecodable
    /// hashes alike; callers cannot tell why verification failed, which
    /// keeps credential errors from leaking information.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(truncate(password), hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}
