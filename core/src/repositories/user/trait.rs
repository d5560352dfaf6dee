//! User repository trait defining the interface for user data persistence.
//!
//! Implementations handle the actual database operations while keeping the
//! abstraction boundary between domain and infrastructure layers. The flow
//! controller never sees SQL, connection pools, or password hashes coming
//! back out of storage.

use async_trait::async_trait;

use crate::domain::entities::user::{NewAccount, UserAccount};
use crate::errors::DomainError;

/// Outcome of a password check, classified explicitly
///
/// The login flow matches on this exhaustively instead of inspecting a
/// caught error's type; both failure arms are charged against the lockout
/// scopes while infrastructure failures propagate as `DomainError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
    /// Password matched; carries the authenticated account
    Valid(UserAccount),
    /// Account exists but the password is wrong
    InvalidPassword,
    /// No account for this phone number
    UnknownPhone,
}

/// Repository trait for user account persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their normalized phone number
    ///
    /// # Returns
    /// * `Ok(Some(UserAccount))` - user found
    /// * `Ok(None)` - no user with this phone
    /// * `Err(DomainError)` - storage failure
    async fn find_by_phone(&self, phone: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Create an account and its profile in a single transaction
    ///
    /// Either both rows exist afterwards or neither does; a user without a
    /// profile must never be observable.
    async fn create_account(&self, account: NewAccount) -> Result<UserAccount, DomainError>;

    /// Verify a password for the account bound to `phone`
    async fn check_password(
        &self,
        phone: &str,
        password: &str,
    ) -> Result<CredentialCheck, DomainError>;
}
