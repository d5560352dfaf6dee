//! Scope-keyed attempt tracking and lockout

mod scope;
mod service;

#[cfg(test)]
mod tests;

pub use scope::{Dimension, Flow, Scope};
pub use service::{AttemptState, LockoutService};
