//! # OtpAuth Core
//!
//! Core business logic for the OtpAuth backend: the OTP lifecycle, one-time
//! signup tokens, the per-scope lockout engine, and the authentication flow
//! controller that orchestrates them. All I/O (cache, database, SMS, session
//! tokens) sits behind traits defined here and implemented in the
//! infrastructure layer.

pub mod cache;
pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use cache::CacheStore;
pub use errors::{AuthError, DomainError, DomainResult, ValidationError};
