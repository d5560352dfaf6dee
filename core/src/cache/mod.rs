//! Expiring key-value cache abstraction
//!
//! All ephemeral state in the system (OTP codes, signup tokens, failure
//! counters, lock markers) lives in one shared expiring cache behind this
//! trait. Key prefixes keep the record kinds apart: `otp_<phone>`,
//! `signup_token_<token>`, `<flow>:<dimension>:<value>` and `lock:<scope>`.
//!
//! The read-then-write sequences the services rely on (issue-if-absent,
//! redeem-once, count-failures) must be atomic per key, which is why the
//! trait exposes the backend's native atomic primitives instead of separate
//! read and write calls.

use async_trait::async_trait;

pub mod memory;

pub use memory::InMemoryCache;

/// Trait for the shared expiring cache
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a value; `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Write a value with a TTL, overwriting any existing entry
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;

    /// Remove a value; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<(), String>;

    /// Atomically read and remove a value. Two concurrent calls for the same
    /// key can never both observe the value.
    async fn get_and_delete(&self, key: &str) -> Result<Option<String>, String>;

    /// Atomically write a value with a TTL only if the key is absent.
    /// Returns `true` when the write happened.
    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64)
        -> Result<bool, String>;

    /// Atomically increment a counter, initializing it to 1 with the given
    /// TTL when absent. Returns the post-increment value.
    async fn increment_or_init(&self, key: &str, ttl_seconds: u64) -> Result<i64, String>;
}
