//! Error types for the core domain

mod domain_error;

pub use domain_error::{AuthError, DomainError, DomainResult, ValidationError};
