//! Repository interfaces for external persistence

pub mod user;

pub use user::{CredentialCheck, MockUserRepository, UserRepository};
