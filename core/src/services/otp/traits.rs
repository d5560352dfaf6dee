//! Delivery sink for issued OTP codes

use async_trait::async_trait;

/// Trait for OTP delivery (SMS gateway, queue, or log sink)
///
/// Delivery is best-effort: implementations are expected to return quickly
/// and handle retries/dead-lettering on their own. The caller never learns
/// whether the message reached the handset.
#[async_trait]
pub trait OtpSender: Send + Sync {
    /// Hand a code off for delivery to `phone`
    async fn send(&self, phone: &str, code: &str) -> Result<(), String>;
}
