//! Domain-specific error types for authentication and related operations
//!
//! Every variant here is an expected, user-facing outcome of the flow; only
//! `Infrastructure` and `Internal` represent faults that should surface as
//! server errors at the transport layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// An unexpired OTP already exists for this phone. Informational rate
    /// gate, never counted against the lockout threshold.
    #[error("A code was already sent; wait for it to expire before requesting a new one")]
    OtpAlreadyIssued,

    /// A lockout scope covering this request is locked
    #[error("Too many failed attempts; try again later")]
    LockedOut,

    /// Submitted OTP did not match the live code
    #[error("The submitted code is incorrect")]
    InvalidOtp,

    /// No live OTP for this phone (expired or never issued)
    #[error("The code has expired; request a new one")]
    OtpExpired,

    /// Signup token absent, expired, or already redeemed
    #[error("The signup token is invalid or has expired")]
    InvalidSignupToken,

    /// Unknown phone or wrong password on the login path
    #[error("Invalid phone number or password")]
    InvalidCredentials,

    /// An account already exists for this phone
    #[error("An account with this phone number already exists")]
    AccountAlreadyExists,
}

/// Validation errors recovered locally, never charged to the lockout engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid phone number: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },
}

/// Top-level error type returned by core services
#[derive(Error, Debug)]
pub enum DomainError {
    /// Expected authentication outcome
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Malformed input, rejected before any state is touched
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database failure
    #[error("Database error: {0}")]
    Database(String),

    /// Cache (Redis) failure
    #[error("Cache error: {0}")]
    Infrastructure(String),

    /// Unclassified internal failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Result alias used throughout the core crate
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether this error is an expected flow outcome rather than a fault
    pub fn is_expected(&self) -> bool {
        matches!(self, DomainError::Auth(_) | DomainError::Validation(_))
    }
}
