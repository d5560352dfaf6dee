//! Fire-and-forget OTP delivery over an SMS gateway
//!
//! The issue path must not block on, or fail because of, the SMS provider.
//! `send` hands the message to a background task and returns immediately;
//! the task retries with exponential backoff and logs a dead-letter line
//! when every attempt fails.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, warn};

use oa_core::services::OtpSender;
use oa_shared::utils::phone::mask_phone;

use super::SmsGateway;

/// OTP sender that never surfaces delivery failures to the caller
pub struct BestEffortSender {
    gateway: Arc<dyn SmsGateway>,
    max_attempts: u32,
    retry_delay_ms: u64,
}

impl BestEffortSender {
    pub fn new(gateway: Arc<dyn SmsGateway>) -> Self {
        Self {
            gateway,
            max_attempts: 3,
            retry_delay_ms: 1000,
        }
    }

    /// Override the retry policy
    pub fn with_retry(mut self, max_attempts: u32, retry_delay_ms: u64) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay_ms = retry_delay_ms;
        self
    }
}

#[async_trait]
impl OtpSender for BestEffortSender {
    async fn send(&self, phone: &str, code: &str) -> Result<(), String> {
        let gateway = Arc::clone(&self.gateway);
        let phone = phone.to_string();
        let body = format!("Your verification code is {}", code);
        let max_attempts = self.max_attempts;
        let retry_delay_ms = self.retry_delay_ms;

        tokio::spawn(async move {
            let mut delay = retry_delay_ms;
            for attempt in 1..=max_attempts {
                match gateway.send_sms(&phone, &body).await {
                    Ok(()) => {
                        debug!(
                            phone = %mask_phone(&phone),
                            provider = gateway.provider_name(),
                            attempt,
                            "OTP delivered"
                        );
                        return;
                    }
                    Err(e) if attempt < max_attempts => {
                        warn!(
                            phone = %mask_phone(&phone),
                            attempt,
                            "OTP delivery attempt failed: {}. Retrying in {}ms",
                            e,
                            delay
                        );
                        sleep(Duration::from_millis(delay)).await;
                        delay = (delay * 2).min(10_000);
                    }
                    Err(e) => {
                        warn!(
                            phone = %mask_phone(&phone),
                            provider = gateway.provider_name(),
                            attempts = max_attempts,
                            "OTP delivery abandoned: {}",
                            e
                        );
                    }
                }
            }
        });

        Ok(())
    }
}
