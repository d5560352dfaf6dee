//! Mock SMS gateway for development and tests
//!
//! Logs the message instead of sending it and records every delivery so
//! tests can assert on them.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use oa_shared::utils::phone::mask_phone;

use super::SmsGateway;
use crate::InfrastructureError;

/// SMS gateway that records messages instead of delivering them
#[derive(Default)]
pub struct MockSmsGateway {
    /// Recorded (phone, body) pairs
    pub sent: Mutex<Vec<(String, String)>>,
    /// When set, every send fails
    pub fail: Mutex<bool>,
}

impl MockSmsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Number of messages recorded so far
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), InfrastructureError> {
        if *self.fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(InfrastructureError::Sms("mock gateway failure".to_string()));
        }

        info!(phone = %mask_phone(to), "[MOCK SMS] {}", body);
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((to.to_string(), body.to_string()));
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_records_messages() {
        let gateway = MockSmsGateway::new();
        gateway
            .send_sms("+989121234567", "Your code is 123456")
            .await
            .unwrap();

        let sent = gateway.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+989121234567");
    }

    #[tokio::test]
    async fn test_mock_gateway_can_fail() {
        let gateway = MockSmsGateway::new();
        gateway.set_failing(true);
        assert!(gateway.send_sms("+989121234567", "123456").await.is_err());
        assert_eq!(gateway.sent_count(), 0);
    }
}
