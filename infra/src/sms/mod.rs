//! SMS delivery module
//!
//! Delivery is split in two layers: an [`SmsGateway`] speaks to a concrete
//! provider and reports real success or failure, while [`BestEffortSender`]
//! adapts a gateway to the core delivery seam with fire-and-forget
//! semantics, bounded retry, and dead-letter logging.

pub mod best_effort;
pub mod http_gateway;
pub mod mock_gateway;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::InfrastructureError;

pub use best_effort::BestEffortSender;
pub use http_gateway::HttpSmsGateway;
pub use mock_gateway::MockSmsGateway;

/// Common interface for SMS providers
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Deliver `body` to `to`, returning the provider's real outcome
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), InfrastructureError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}

/// SMS provider configuration
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Provider selector: "mock" or "http"
    pub provider: String,
    /// Provider API endpoint
    pub api_url: String,
    /// API username or key
    pub api_key: String,
    /// API password or secret
    pub api_secret: String,
    /// Sender line or identifier
    pub from_number: String,
}

impl SmsConfig {
    /// Create from environment variables, defaulting to the mock provider
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_url: std::env::var("SMS_API_URL").unwrap_or_default(),
            api_key: std::env::var("SMS_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("SMS_API_SECRET").unwrap_or_default(),
            from_number: std::env::var("SMS_FROM_NUMBER").unwrap_or_default(),
        }
    }
}

/// Build an SMS gateway from configuration
///
/// Falls back to the mock gateway when the configured provider cannot be
/// constructed, so the service still starts in development environments.
pub fn create_sms_gateway(config: &SmsConfig) -> Arc<dyn SmsGateway> {
    match config.provider.as_str() {
        "http" => match HttpSmsGateway::new(config) {
            Ok(gateway) => Arc::new(gateway),
            Err(e) => {
                warn!("Failed to initialize HTTP SMS gateway: {}. Using mock", e);
                Arc::new(MockSmsGateway::new())
            }
        },
        "mock" => Arc::new(MockSmsGateway::new()),
        other => {
            warn!("Unknown SMS provider '{}'. Using mock", other);
            Arc::new(MockSmsGateway::new())
        }
    }
}
