//! Flow controller result types

use crate::domain::entities::user::UserAccount;
use crate::domain::value_objects::SessionTokens;

/// Outcome of the first authentication step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartAuthOutcome {
    /// The phone already belongs to an account; the client should proceed
    /// to password login. No side effects were performed.
    ExistingAccount,
    /// A fresh OTP was issued and handed to the delivery sink; the client
    /// should proceed with signup.
    OtpSent,
}

/// Profile fields submitted with the signup completion step
#[derive(Debug, Clone)]
pub struct SignupProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Raw password; hashed by the controller before persistence
    pub password: String,
}

/// A completed signup: the created account plus its first session
#[derive(Debug, Clone)]
pub struct SignupResult {
    pub user: UserAccount,
    pub tokens: SessionTokens,
}
