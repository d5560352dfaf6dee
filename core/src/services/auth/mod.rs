//! Authentication flow controller

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::AuthService;
pub use types::{SignupProfile, SignupResult, StartAuthOutcome};
