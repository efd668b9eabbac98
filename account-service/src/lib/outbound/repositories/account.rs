use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::FullName;
use crate::account::models::NewAccount;
use crate::account::models::Role;
use crate::account::ports::AccountRepository;

const ACCOUNT_COLUMNS: &str =
    "id, full_name, email, password_hash, role, is_active, is_verified, created_at, updated_at";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    full_name: String,
    email: String,
    password_hash: String,
    role: String,
    is_active: bool,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            full_name: FullName::new(row.full_name)
                .map_err(|e| AccountError::Database(format!("Corrupt account row: {}", e)))?,
            email: EmailAddress::new(row.email)
                .map_err(|e| AccountError::Database(format!("Corrupt account row: {}", e)))?,
            password_hash: row.password_hash,
            role: row
                .role
                .parse::<Role>()
                .map_err(|e| AccountError::Database(format!("Corrupt account row: {}", e)))?,
            is_active: row.is_active,
            is_verified: row.is_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_insert_error(e: sqlx::Error) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        // The storage constraint is the final arbiter of the uniqueness
        // race; losing it is the same outcome as a pre-check hit.
        if db_err.is_unique_violation() && db_err.constraint() == Some("accounts_email_key") {
            return AccountError::DuplicateEmail;
        }
    }
    AccountError::Database(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        // Pre-check then insert inside one transaction; any failure path
        // drops the transaction and rolls back, leaving no partial row.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AccountError::Database(e.to_string()))?;

        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM accounts WHERE email = $1")
            .bind(account.email.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AccountError::Database(e.to_string()))?;

        if existing.is_some() {
            return Err(AccountError::DuplicateEmail);
        }

        let row: AccountRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO accounts (full_name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.full_name.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        tx.commit()
            .await
            .map_err(|e| AccountError::Database(e.to_string()))?;

        row.try_into()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }
}
