//! Authentication and abuse-control configuration

use serde::{Deserialize, Serialize};

/// One-time password configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Time-to-live of an issued OTP code in seconds
    pub code_ttl_seconds: u64,

    /// Time-to-live of a one-time signup token in seconds
    pub signup_token_ttl_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: 180,         // 3 minutes
            signup_token_ttl_seconds: 600, // 10 minutes
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            code_ttl_seconds: env_u64("OTP_CODE_TTL_SECONDS", 180),
            signup_token_ttl_seconds: env_u64("SIGNUP_TOKEN_TTL_SECONDS", 600),
        }
    }
}

/// Failed-attempt lockout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockoutConfig {
    /// Consecutive failures before a scope is locked
    pub max_failed_attempts: u32,

    /// Duration in seconds for which a locked scope stays locked
    pub lock_duration_seconds: u64,

    /// TTL for failure counters in seconds
    pub counter_ttl_seconds: u64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 3,
            lock_duration_seconds: 3600, // 1 hour
            counter_ttl_seconds: 3600,
        }
    }
}

impl LockoutConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            max_failed_attempts: env_u64("LOCKOUT_MAX_FAILED_ATTEMPTS", 3) as u32,
            lock_duration_seconds: env_u64("LOCKOUT_DURATION_SECONDS", 3600),
            counter_ttl_seconds: env_u64("LOCKOUT_COUNTER_TTL_SECONDS", 3600),
        }
    }
}

/// JWT session-token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("change-me-in-production"),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("otp-auth"),
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".to_string()),
            access_token_expiry: env_u64("JWT_ACCESS_EXPIRY_SECONDS", 900) as i64,
            refresh_token_expiry: env_u64("JWT_REFRESH_EXPIRY_SECONDS", 604800) as i64,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "otp-auth".to_string()),
        }
    }

    /// Check if the default secret is still in use (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "change-me-in-production"
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.code_ttl_seconds, 180);
        assert_eq!(config.signup_token_ttl_seconds, 600);
    }

    #[test]
    fn test_lockout_defaults() {
        let config = LockoutConfig::default();
        assert_eq!(config.max_failed_attempts, 3);
        assert_eq!(config.lock_duration_seconds, 3600);
    }

    #[test]
    fn test_default_secret_detection() {
        assert!(JwtConfig::default().is_using_default_secret());
        let config = JwtConfig {
            secret: "real-secret".to_string(),
            ..Default::default()
        };
        assert!(!config.is_using_default_secret());
    }
}
