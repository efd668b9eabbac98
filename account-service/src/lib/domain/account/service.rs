use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenKind;
use chrono::Duration;

use crate::account::errors::AccountError;
use crate::account::errors::AuthError;
use crate::account::errors::ValidationError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::Authenticated;
use crate::account::models::LoginCommand;
use crate::account::models::NewAccount;
use crate::account::models::SignupCommand;
use crate::account::models::TokenPair;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;

/// Authentication workflow implementation.
///
/// Orchestrates the account registry, credential hasher, and token codec
/// into atomic signup/login operations, and acts as the error-translation
/// boundary for its callers.
pub struct AuthService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    access_token_ttl: Duration,
}

impl<R> AuthService<R>
where
    R: AccountRepository,
{
    /// Create the workflow with explicitly injected collaborators.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `password_hasher` - Credential hasher
    /// * `token_codec` - Token issuance/validation codec
    /// * `access_token_ttl` - Access-token lifetime
    pub fn new(
        repository: Arc<R>,
        password_hasher: PasswordHasher,
        token_codec: TokenCodec,
        access_token_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_codec,
            access_token_ttl,
        }
    }

    fn issue_pair(&self, account: &Account) -> Result<TokenPair, AuthError> {
        let subject = account.id.to_string();

        let access_token = self
            .token_codec
            .issue_access(
                &subject,
                Some(account.email.as_str().to_string()),
                Some(account.role.as_str().to_string()),
                self.access_token_ttl,
            )
            .map_err(|e| AuthError::Internal(format!("Token issuance failed: {}", e)))?;

        let refresh_token = self
            .token_codec
            .issue_refresh(&subject)
            .map_err(|e| AuthError::Internal(format!("Token issuance failed: {}", e)))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_token_ttl.num_seconds(),
        })
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: AccountRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<Authenticated, AuthError> {
        // One hash call per signup; the plaintext is not retained past it.
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let account = self
            .repository
            .create(NewAccount {
                full_name: command.full_name,
                email: command.email,
                password_hash,
                role: command.role,
            })
            .await
            .map_err(|e| match e {
                // A lost uniqueness race is the caller's input problem,
                // not a server fault.
                AccountError::DuplicateEmail => {
                    AuthError::Validation(ValidationError::new("email already registered"))
                }
                AccountError::Database(msg) => AuthError::Database(msg),
            })?;

        tracing::info!(account_id = %account.id, email = %account.email, "Account created");

        let tokens = self.issue_pair(&account)?;
        Ok(Authenticated { account, tokens })
    }

    async fn login(&self, command: LoginCommand) -> Result<Authenticated, AuthError> {
        let account = match self
            .repository
            .find_by_email(&command.email)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?
        {
            Some(account) => account,
            None => {
                tracing::warn!(email = %command.email, "Login attempt with unknown email");
                return Err(AuthError::AuthenticationFailed);
            }
        };

        // One verification call per login attempt.
        if !self
            .password_hasher
            .verify(&command.password, &account.password_hash)
        {
            tracing::warn!(email = %command.email, "Failed login attempt");
            return Err(AuthError::AuthenticationFailed);
        }

        // Checked after verification so inactive accounts cost the same
        // as a wrong password.
        if !account.is_active {
            tracing::warn!(email = %command.email, "Login attempt for inactive account");
            return Err(AuthError::AuthenticationFailed);
        }

        tracing::info!(account_id = %account.id, "Account authenticated");

        let tokens = self.issue_pair(&account)?;
        Ok(Authenticated { account, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Authenticated, AuthError> {
        let claims = self.validate(refresh_token, TokenKind::Refresh)?;

        let id = AccountId::from_string(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let account = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?
            .ok_or(AuthError::InvalidToken)?;

        if !account.is_active {
            return Err(AuthError::AuthenticationFailed);
        }

        let tokens = self.issue_pair(&account)?;
        Ok(Authenticated { account, tokens })
    }

    fn validate(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let claims = self
            .token_codec
            .decode(token)
            .map_err(|_| AuthError::InvalidToken)?;
        TokenCodec::require_kind(&claims, expected).map_err(|_| AuthError::InvalidToken)?;
        Ok(claims)
    }

    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, AuthError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::account::models::EmailAddress;
    use crate::account::models::FullName;
    use crate::account::models::Role;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError>;
        }
    }

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_cost(4)
    }

    fn service(repository: MockTestAccountRepository) -> AuthService<MockTestAccountRepository> {
        AuthService::new(
            Arc::new(repository),
            hasher(),
            TokenCodec::new(SECRET),
            Duration::minutes(30),
        )
    }

    fn persisted(new_account: NewAccount) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId(1),
            full_name: new_account.full_name,
            email: new_account.email,
            password_hash: new_account.password_hash,
            role: new_account.role,
            is_active: true,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn stored_account(password_hash: String, is_active: bool) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId(1),
            full_name: FullName::new("Alice Lee".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash,
            role: Role::Student,
            is_active,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn signup_command() -> SignupCommand {
        SignupCommand::new(
            "Alice Lee".to_string(),
            "alice@example.com".to_string(),
            "Password123".to_string(),
            "student".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_signup_success() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_create()
            .withf(|account| {
                account.email.as_str() == "alice@example.com"
                    && account.password_hash.starts_with("$2")
                    && account.password_hash != "Password123"
            })
            .times(1)
            .returning(|account| Ok(persisted(account)));

        let service = service(repository);
        let result = service.signup(signup_command()).await.unwrap();

        // Stored hash verifies against the original plaintext
        assert!(hasher().verify("Password123", &result.account.password_hash));
        assert!(result.account.is_active);
        assert!(!result.account.is_verified);

        // Issued pair carries the new account's identity
        let claims = service
            .validate(&result.tokens.access_token, TokenKind::Access)
            .unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
        assert_eq!(claims.role.as_deref(), Some("student"));

        let refresh_claims = service
            .validate(&result.tokens.refresh_token, TokenKind::Refresh)
            .unwrap();
        assert_eq!(refresh_claims.sub, "1");
        assert_eq!(result.tokens.expires_in, 30 * 60);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_is_validation_error() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(AccountError::DuplicateEmail));

        let result = service(repository).signup(signup_command()).await;

        match result.unwrap_err() {
            AuthError::Validation(e) => assert_eq!(e.message, "email already registered"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_signup_database_error_propagates_as_database() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(AccountError::Database("connection reset".to_string())));

        let result = service(repository).signup(signup_command()).await;
        assert!(matches!(result.unwrap_err(), AuthError::Database(_)));
    }

    #[tokio::test]
    async fn test_login_success() {
        let password_hash = hasher().hash("Password123").unwrap();
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(stored_account(password_hash.clone(), true))));

        let service = service(repository);
        let result = service
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "Password123".to_string(),
            })
            .await
            .unwrap();

        let claims = service
            .validate(&result.tokens.access_token, TokenKind::Access)
            .unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        // Wrong password
        let password_hash = hasher().hash("Password123").unwrap();
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(stored_account(password_hash.clone(), true))));
        let wrong_password = service(repository)
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "wrongpass".to_string(),
            })
            .await
            .unwrap_err();

        // Unknown email
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        let unknown_email = service(repository)
            .login(LoginCommand {
                email: "nobody@example.com".to_string(),
                password: "Password123".to_string(),
            })
            .await
            .unwrap_err();

        // Inactive account, correct password
        let password_hash = hasher().hash("Password123").unwrap();
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(stored_account(password_hash.clone(), false))));
        let inactive = service(repository)
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "Password123".to_string(),
            })
            .await
            .unwrap_err();

        // All three collapse to the same variant with the same message
        for err in [&wrong_password, &unknown_email, &inactive] {
            assert!(matches!(err, AuthError::AuthenticationFailed));
            assert_eq!(err.to_string(), "Invalid email or password");
        }
    }

    #[tokio::test]
    async fn test_validate_rejects_kind_mismatch() {
        let repository = MockTestAccountRepository::new();
        let service = service(repository);

        let codec = TokenCodec::new(SECRET);
        let access = codec
            .issue_access("1", None, None, Duration::minutes(30))
            .unwrap();
        let refresh = codec.issue_refresh("1").unwrap();

        assert!(service.validate(&access, TokenKind::Access).is_ok());
        assert!(matches!(
            service.validate(&access, TokenKind::Refresh).unwrap_err(),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            service.validate(&refresh, TokenKind::Access).unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[tokio::test]
    async fn test_validate_rejects_garbage_token() {
        let repository = MockTestAccountRepository::new();
        let service = service(repository);

        assert!(matches!(
            service
                .validate("invalid.token.here", TokenKind::Access)
                .unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_pair() {
        let password_hash = hasher().hash("Password123").unwrap();
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(AccountId(1)))
            .times(1)
            .returning(move |_| Ok(Some(stored_account(password_hash.clone(), true))));

        let service = service(repository);
        let refresh_token = TokenCodec::new(SECRET).issue_refresh("1").unwrap();

        let result = service.refresh(&refresh_token).await.unwrap();
        let claims = service
            .validate(&result.tokens.access_token, TokenKind::Access)
            .unwrap();
        assert_eq!(claims.sub, "1");
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let repository = MockTestAccountRepository::new();
        let service = service(repository);

        let access = TokenCodec::new(SECRET)
            .issue_access("1", None, None, Duration::minutes(30))
            .unwrap();

        assert!(matches!(
            service.refresh(&access).await.unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[tokio::test]
    async fn test_refresh_for_missing_account_is_invalid_token() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);
        let refresh_token = TokenCodec::new(SECRET).issue_refresh("1").unwrap();

        assert!(matches!(
            service.refresh(&refresh_token).await.unwrap_err(),
            AuthError::InvalidToken
        ));
    }
}
