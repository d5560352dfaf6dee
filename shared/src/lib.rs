//! # OtpAuth Shared
//!
//! Cross-cutting types for the OtpAuth backend: configuration structs,
//! common response types, and phone number utilities. This crate has no
//! knowledge of the domain services; it only carries what every layer needs.

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::*;
pub use types::*;
