//! In-memory mock implementation of the user repository
//!
//! Used by unit tests across the workspace. Accounts live in a
//! mutex-guarded vector together with their password hashes; `fail_next_create`
//! lets tests simulate a storage transaction that rolls back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::user::{NewAccount, UserAccount};
use crate::errors::{AuthError, DomainError};

use super::r#trait::{CredentialCheck, UserRepository};

struct StoredAccount {
    account: UserAccount,
    password_hash: String,
}

/// Mock user repository backed by process memory
pub struct MockUserRepository {
    accounts: Arc<Mutex<Vec<StoredAccount>>>,
    fail_next_create: AtomicBool,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(Vec::new())),
            fail_next_create: AtomicBool::new(false),
        }
    }

    /// Seed the repository with an existing account
    pub fn with_existing_account(phone: &str, password_hash: &str) -> Self {
        let repo = Self::new();
        repo.accounts.lock().unwrap().push(StoredAccount {
            account: UserAccount {
                id: Uuid::new_v4(),
                phone: phone.to_string(),
                first_name: "Existing".to_string(),
                last_name: "User".to_string(),
                email: "existing@example.com".to_string(),
                created_at: Utc::now(),
            },
            password_hash: password_hash.to_string(),
        });
        repo
    }

    /// Make the next `create_account` fail as a rolled-back transaction
    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    /// Number of stored accounts
    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<UserAccount>, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .find(|stored| stored.account.phone == phone)
            .map(|stored| stored.account.clone()))
    }

    async fn create_account(&self, account: NewAccount) -> Result<UserAccount, DomainError> {
        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            // The transaction rolled back; no partial rows remain
            return Err(DomainError::Database(
                "simulated transaction failure".to_string(),
            ));
        }

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|s| s.account.phone == account.phone) {
            return Err(DomainError::Auth(AuthError::AccountAlreadyExists));
        }

        let created = UserAccount {
            id: Uuid::new_v4(),
            phone: account.phone,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            created_at: Utc::now(),
        };
        accounts.push(StoredAccount {
            account: created.clone(),
            password_hash: account.password_hash,
        });
        Ok(created)
    }

    async fn check_password(
        &self,
        phone: &str,
        password: &str,
    ) -> Result<CredentialCheck, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.iter().find(|s| s.account.phone == phone) {
            Some(stored) => {
                let matches = bcrypt::verify(password, &stored.password_hash)
                    .map_err(|e| DomainError::Internal {
                        message: format!("password verification failed: {}", e),
                    })?;
                if matches {
                    Ok(CredentialCheck::Valid(stored.account.clone()))
                } else {
                    Ok(CredentialCheck::InvalidPassword)
                }
            }
            None => Ok(CredentialCheck::UnknownPhone),
        }
    }
}
