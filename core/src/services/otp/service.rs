//! OTP issue and verification

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::Rng;
use tracing::{info, warn};

use oa_shared::config::OtpConfig;
use oa_shared::utils::phone::mask_phone;

use crate::cache::CacheStore;
use crate::errors::{DomainError, DomainResult};

use super::traits::OtpSender;

/// Result of an issue request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// A fresh code was stored and handed to the delivery sink
    Issued,
    /// An unexpired code already exists for this phone; nothing was sent
    AlreadyActive,
}

/// Result of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    /// Code matched and was consumed
    Matched,
    /// Code present but different; the stored code stays redeemable
    Mismatched,
    /// No live code for this phone
    Expired,
}

/// Service managing the OTP lifecycle
///
/// Codes live exclusively in the shared expiring cache under
/// `otp_<phone>`; at most one is live per phone at any time.
pub struct OtpService<C, S>
where
    C: CacheStore,
    S: OtpSender,
{
    cache: Arc<C>,
    sender: Arc<S>,
    config: OtpConfig,
}

impl<C, S> OtpService<C, S>
where
    C: CacheStore,
    S: OtpSender,
{
    pub fn new(cache: Arc<C>, sender: Arc<S>, config: OtpConfig) -> Self {
        Self {
            cache,
            sender,
            config,
        }
    }

    fn otp_key(phone: &str) -> String {
        format!("otp_{}", phone)
    }

    /// Generate a uniformly random 6-digit code
    fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Issue a code for `phone` unless one is already live
    ///
    /// The existence check and the write are a single conditional-set, so
    /// two concurrent calls can never both issue a code. On success the code
    /// is handed to the delivery sink; delivery failure is logged and never
    /// surfaced to the caller.
    pub async fn issue(&self, phone: &str) -> DomainResult<IssueOutcome> {
        let code = Self::generate_code();

        let stored = self
            .cache
            .set_if_absent(&Self::otp_key(phone), &code, self.config.code_ttl_seconds)
            .await
            .map_err(DomainError::Infrastructure)?;

        if !stored {
            info!(
                phone = %mask_phone(phone),
                event = "otp_rate_gated",
                "OTP requested while a previous code is still live"
            );
            return Ok(IssueOutcome::AlreadyActive);
        }

        info!(
            phone = %mask_phone(phone),
            ttl_seconds = self.config.code_ttl_seconds,
            event = "otp_issued",
            "Issued new verification code"
        );

        if let Err(e) = self.sender.send(phone, &code).await {
            warn!(
                phone = %mask_phone(phone),
                error = %e,
                event = "otp_delivery_handoff_failed",
                "Could not hand code to the delivery sink"
            );
        }

        Ok(IssueOutcome::Issued)
    }

    /// Verify a submitted code against the live one
    ///
    /// Only a successful match consumes the stored code; a mismatch leaves
    /// it redeemable until its own TTL so that retries are bounded by the
    /// lockout engine, not by code consumption. The consume step re-checks
    /// the atomically removed value, so of N concurrent callers submitting
    /// the correct code exactly one observes `Matched`.
    pub async fn verify(&self, phone: &str, submitted: &str) -> DomainResult<OtpCheck> {
        let key = Self::otp_key(phone);

        let live = self
            .cache
            .get(&key)
            .await
            .map_err(DomainError::Infrastructure)?;

        let expected = match live {
            Some(code) => code,
            None => return Ok(OtpCheck::Expired),
        };

        if expected != submitted {
            warn!(
                phone = %mask_phone(phone),
                event = "otp_mismatch",
                "Incorrect verification code submitted"
            );
            return Ok(OtpCheck::Mismatched);
        }

        // Consume atomically; a concurrent winner may have beaten us to it
        let consumed = self
            .cache
            .get_and_delete(&key)
            .await
            .map_err(DomainError::Infrastructure)?;

        match consumed {
            Some(code) if code == submitted => {
                info!(
                    phone = %mask_phone(phone),
                    event = "otp_verified",
                    "Verification code matched and consumed"
                );
                Ok(OtpCheck::Matched)
            }
            _ => Ok(OtpCheck::Expired),
        }
    }
}
