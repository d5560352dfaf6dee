//! MySQL implementation of the UserRepository trait
//!
//! Accounts are split across two tables: `users` carries the identity and
//! credential hash, `profiles` carries the verified phone and contact
//! details. `create_account` writes both rows inside one transaction so a
//! user without a profile is never observable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use oa_core::domain::entities::user::{NewAccount, UserAccount};
use oa_core::errors::DomainError;
use oa_core::repositories::{CredentialCheck, UserRepository};
use oa_shared::utils::phone::mask_phone;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<UserAccount, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to read id: {}", e)))?;

        Ok(UserAccount {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("Invalid user UUID: {}", e)))?,
            phone: row
                .try_get("phone")
                .map_err(|e| DomainError::Database(format!("Failed to read phone: {}", e)))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::Database(format!("Failed to read first_name: {}", e)))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| DomainError::Database(format!("Failed to read last_name: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Database(format!("Failed to read email: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to read created_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<UserAccount>, DomainError> {
        let query = r#"
            SELECT u.id, p.phone, u.first_name, u.last_name, u.email, u.created_at
            FROM users u
            INNER JOIN profiles p ON p.user_id = u.id
            WHERE p.phone = ?
        "#;

        let row = sqlx::query(query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(phone = %mask_phone(phone), error = %e, "Failed to look up user");
                DomainError::Database(format!("Failed to look up user: {}", e))
            })?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn create_account(&self, account: NewAccount) -> Result<UserAccount, DomainError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(phone = %mask_phone(&account.phone), error = %e, "Failed to insert user");
            DomainError::Database(format!("Failed to insert user: {}", e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, phone, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&account.phone)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(phone = %mask_phone(&account.phone), error = %e, "Failed to insert profile");
            DomainError::Database(format!("Failed to insert profile: {}", e))
        })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Database(format!("Failed to commit account: {}", e)))?;

        debug!(phone = %mask_phone(&account.phone), "Created user account");

        Ok(UserAccount {
            id,
            phone: account.phone,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            created_at,
        })
    }

    async fn check_password(
        &self,
        phone: &str,
        password: &str,
    ) -> Result<CredentialCheck, DomainError> {
        let query = r#"
            SELECT u.id, p.phone, u.first_name, u.last_name, u.email,
                   u.created_at, u.password_hash
            FROM users u
            INNER JOIN profiles p ON p.user_id = u.id
            WHERE p.phone = ?
        "#;

        let row = sqlx::query(query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(phone = %mask_phone(phone), error = %e, "Failed to look up credentials");
                DomainError::Database(format!("Failed to look up credentials: {}", e))
            })?;

        let Some(row) = row else {
            return Ok(CredentialCheck::UnknownPhone);
        };

        let hash: String = row
            .try_get("password_hash")
            .map_err(|e| DomainError::Database(format!("Failed to read password_hash: {}", e)))?;

        let matches = bcrypt::verify(password, &hash)
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification failed: {}", e),
            })?;

        if matches {
            Ok(CredentialCheck::Valid(Self::row_to_account(&row)?))
        } else {
            Ok(CredentialCheck::InvalidPassword)
        }
    }
}
