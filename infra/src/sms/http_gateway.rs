//! HTTP SMS gateway
//!
//! Generic JSON-over-HTTPS provider client with basic authentication. The
//! request shape (`to`, `from`, `body`) matches the aggregator APIs the
//! service is deployed against.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use tracing::{debug, error};

use oa_shared::utils::phone::mask_phone;

use super::{SmsConfig, SmsGateway};
use crate::InfrastructureError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    from: &'a str,
    body: &'a str,
}

/// SMS gateway backed by an HTTP provider API
pub struct HttpSmsGateway {
    client: reqwest::Client,
    api_url: String,
    auth_header: String,
    from_number: String,
}

impl HttpSmsGateway {
    /// Build a gateway from configuration
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.is_empty() {
            return Err(InfrastructureError::Config("SMS_API_URL not set".to_string()));
        }
        if config.from_number.is_empty() {
            return Err(InfrastructureError::Config(
                "SMS_FROM_NUMBER not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| InfrastructureError::Config(format!("HTTP client: {}", e)))?;

        let credentials = BASE64.encode(format!("{}:{}", config.api_key, config.api_secret));

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            auth_header: format!("Basic {}", credentials),
            from_number: config.from_number.clone(),
        })
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), InfrastructureError> {
        let request = SendRequest {
            to,
            from: &self.from_number,
            body,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", &self.auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(phone = %mask_phone(to), error = %e, "SMS request failed");
                InfrastructureError::Sms(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(phone = %mask_phone(to), "SMS accepted by provider");
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_default();
            error!(
                phone = %mask_phone(to),
                status = %status,
                "SMS provider rejected the message: {}",
                detail
            );
            Err(InfrastructureError::Sms(format!(
                "Provider returned {}: {}",
                status, detail
            )))
        }
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str, from_number: &str) -> SmsConfig {
        SmsConfig {
            provider: "http".to_string(),
            api_url: api_url.to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            from_number: from_number.to_string(),
        }
    }

    #[test]
    fn test_rejects_missing_api_url() {
        assert!(HttpSmsGateway::new(&config("", "+15550001")).is_err());
    }

    #[test]
    fn test_rejects_missing_from_number() {
        assert!(HttpSmsGateway::new(&config("https://sms.example.com/send", "")).is_err());
    }

    #[test]
    fn test_builds_with_complete_config() {
        let gateway = HttpSmsGateway::new(&config("https://sms.example.com/send", "+15550001"));
        assert!(gateway.is_ok());
        assert_eq!(gateway.unwrap().provider_name(), "http");
    }
}
