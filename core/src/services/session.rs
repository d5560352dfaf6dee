//! Session credential issuance boundary
//!
//! Session token mechanics (format, signing, rotation) are external to this
//! core; the flow controller only needs an opaque access/refresh pair for an
//! authenticated account.

use async_trait::async_trait;

use crate::domain::entities::user::UserAccount;
use crate::domain::value_objects::SessionTokens;
use crate::errors::DomainError;

/// Trait for issuing session credentials
#[async_trait]
pub trait SessionIssuer: Send + Sync {
    /// Produce an access/refresh pair for the given account
    async fn issue(&self, user: &UserAccount) -> Result<SessionTokens, DomainError>;
}
