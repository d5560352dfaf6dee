//! # Infrastructure Layer
//!
//! Concrete implementations of the core crate's boundaries:
//! - **Cache**: Redis-backed expiring key-value store
//! - **Database**: MySQL user repository using SQLx
//! - **SMS**: best-effort OTP delivery with retry, over a pluggable gateway
//! - **Auth**: JWT session credential issuer

pub mod auth;
pub mod cache;
pub mod database;
pub mod sms;

use thiserror::Error;

/// Errors raised while constructing or talking to infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("SMS gateway error: {0}")]
    Sms(String),
}
