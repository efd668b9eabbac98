use async_trait::async_trait;
use auth::Claims;
use auth::TokenKind;

use crate::account::errors::AccountError;
use crate::account::errors::AuthError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::Authenticated;
use crate::account::models::LoginCommand;
use crate::account::models::NewAccount;
use crate::account::models::SignupCommand;

/// Port for the authentication workflow exposed to the request layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token pair.
    ///
    /// # Errors
    /// * `Validation` - Duplicate email (surfaced as a validation problem)
    /// * `Database` - Storage operation failed
    /// * `Internal` - Hashing or token issuance failed
    async fn signup(&self, command: SignupCommand) -> Result<Authenticated, AuthError>;

    /// Authenticate stored credentials and issue a fresh token pair.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown email, wrong password, or
    ///   inactive account; deliberately indistinguishable
    /// * `Database` - Storage operation failed
    async fn login(&self, command: LoginCommand) -> Result<Authenticated, AuthError>;

    /// Exchange a valid refresh token for a fresh token pair.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid, expired, wrong kind, or the
    ///   subject no longer resolves to an account
    /// * `AuthenticationFailed` - Account is inactive
    /// * `Database` - Storage operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<Authenticated, AuthError>;

    /// Decode a token and require the expected kind.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature/decode failure, expiry, or kind mismatch
    fn validate(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError>;

    /// Look up an account by identifier.
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, AuthError>;
}

/// Persistence operations for the account registry.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account, enforcing email uniqueness.
    ///
    /// Pre-checks the email, inserts, and treats a storage-level
    /// uniqueness violation identically to a pre-check hit. A failed
    /// create leaves no partial row.
    ///
    /// # Returns
    /// The persisted account including assigned id and timestamps
    ///
    /// # Errors
    /// * `DuplicateEmail` - An account with this email already exists
    /// * `Database` - Storage operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve an account by email (case-sensitive exact match).
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError>;
}
