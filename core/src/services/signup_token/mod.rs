//! One-time signup tokens

mod service;

#[cfg(test)]
mod tests;

pub use service::SignupTokenService;
