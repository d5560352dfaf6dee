//! User account entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user with a verified phone number
///
/// The phone lives on the associated profile row in storage; account and
/// profile are created together in one transaction and are never observable
/// separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier
    pub id: Uuid,
    /// Verified phone number in E.164 format
    pub phone: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Data required to create an account together with its profile
///
/// Carries the already-hashed password; raw passwords never cross the
/// repository boundary.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Verified phone number in E.164 format
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// bcrypt hash of the chosen password
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let user = UserAccount {
            id: Uuid::new_v4(),
            phone: "+989121234567".to_string(),
            first_name: "Sara".to_string(),
            last_name: "Ahmadi".to_string(),
            email: "sara@example.com".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(user.full_name(), "Sara Ahmadi");
    }
}
