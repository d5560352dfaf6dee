//! Configuration management for all application layers
//!
//! Each struct carries a `Default` suitable for local development and a
//! `from_env()` constructor that reads environment variables.

pub mod auth;
pub mod cache;
pub mod database;
pub mod server;

pub use auth::{JwtConfig, LockoutConfig, OtpConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
