//! User repository interface

mod mock;
#[allow(clippy::module_inception)]
mod r#trait;

pub use mock::MockUserRepository;
pub use r#trait::{CredentialCheck, UserRepository};
