//! Signup token issue and redemption
//!
//! A signup token bridges OTP verification and profile completion: it binds
//! the verified phone to a bounded window in which the client may finish
//! registration without re-proving phone ownership.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use oa_shared::config::OtpConfig;
use oa_shared::utils::phone::mask_phone;

use crate::cache::CacheStore;
use crate::errors::{DomainError, DomainResult};

/// Service managing one-time signup tokens
pub struct SignupTokenService<C>
where
    C: CacheStore,
{
    cache: Arc<C>,
    config: OtpConfig,
}

impl<C> SignupTokenService<C>
where
    C: CacheStore,
{
    pub fn new(cache: Arc<C>, config: OtpConfig) -> Self {
        Self { cache, config }
    }

    fn token_key(token: &str) -> String {
        format!("signup_token_{}", token)
    }

    /// Issue a fresh token bound to a just-verified phone number
    ///
    /// The token identifier is an unguessable 128-bit UUID; collisions are
    /// negligible so no existence check is needed before the write.
    pub async fn issue(&self, phone: &str) -> DomainResult<String> {
        let token = Uuid::new_v4().to_string();

        self.cache
            .set(
                &Self::token_key(&token),
                phone,
                self.config.signup_token_ttl_seconds,
            )
            .await
            .map_err(DomainError::Infrastructure)?;

        info!(
            phone = %mask_phone(phone),
            ttl_seconds = self.config.signup_token_ttl_seconds,
            event = "signup_token_issued",
            "Issued signup token after OTP verification"
        );

        Ok(token)
    }

    /// Redeem a token, consuming it
    ///
    /// Read and delete happen in one atomic step, so two concurrent
    /// redemptions can never both succeed. Returns the bound phone, or
    /// `None` when the token is absent, expired, or already used.
    pub async fn redeem(&self, token: &str) -> DomainResult<Option<String>> {
        let phone = self
            .cache
            .get_and_delete(&Self::token_key(token))
            .await
            .map_err(DomainError::Infrastructure)?;

        if let Some(ref phone) = phone {
            info!(
                phone = %mask_phone(phone),
                event = "signup_token_redeemed",
                "Signup token redeemed"
            );
        }

        Ok(phone)
    }
}
