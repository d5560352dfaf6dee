//! Attempt tracker and lockout engine
//!
//! Per scope, the state machine is
//! `Clean(0) -> Warned(1..2) -> Locked(3600s) -> Clean`, with `Warned ->
//! Clean` on any success. The lock marker lives under its own key with its
//! own TTL, independent of the failure counter: once set it is authoritative
//! until it expires, and there is no manual unlock path.

use std::sync::Arc;

use tracing::{info, warn};

use oa_shared::config::LockoutConfig;

use crate::cache::CacheStore;
use crate::errors::{DomainError, DomainResult};

use super::scope::Scope;

/// Scope state after an outcome was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// No recent failures
    Clean,
    /// Some failures below the threshold
    Warned(u32),
    /// Threshold reached; the scope rejects attempts until the lock expires
    Locked,
}

/// Generic scope-keyed failure counter with time-based lockout
pub struct LockoutService<C>
where
    C: CacheStore,
{
    cache: Arc<C>,
    config: LockoutConfig,
}

impl<C> LockoutService<C>
where
    C: CacheStore,
{
    pub fn new(cache: Arc<C>, config: LockoutConfig) -> Self {
        Self { cache, config }
    }

    /// Pure read of a scope's lock state; never mutates
    pub async fn is_locked(&self, scope: &Scope) -> DomainResult<bool> {
        let marker = self
            .cache
            .get(&scope.lock_key())
            .await
            .map_err(DomainError::Infrastructure)?;
        Ok(marker.is_some())
    }

    /// Check a pair of scopes; the attempt is permitted only when both are
    /// unlocked
    pub async fn any_locked(&self, scopes: &[Scope]) -> DomainResult<bool> {
        for scope in scopes {
            if self.is_locked(scope).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Record the outcome of a credential check against one scope
    ///
    /// Success clears the failure counter. Failure increments it atomically;
    /// reaching the threshold sets the lock marker for the configured
    /// duration and drops the counter (the lock is now authoritative).
    pub async fn record_outcome(
        &self,
        scope: &Scope,
        succeeded: bool,
    ) -> DomainResult<AttemptState> {
        if succeeded {
            self.cache
                .delete(&scope.counter_key())
                .await
                .map_err(DomainError::Infrastructure)?;
            return Ok(AttemptState::Clean);
        }

        let failures = self
            .cache
            .increment_or_init(&scope.counter_key(), self.config.counter_ttl_seconds)
            .await
            .map_err(DomainError::Infrastructure)?;

        if failures < self.config.max_failed_attempts as i64 {
            warn!(
                scope = %scope,
                failures = failures,
                max_failures = self.config.max_failed_attempts,
                event = "attempt_failed",
                "Failed authentication attempt recorded"
            );
            return Ok(AttemptState::Warned(failures as u32));
        }

        self.cache
            .set(&scope.lock_key(), "locked", self.config.lock_duration_seconds)
            .await
            .map_err(DomainError::Infrastructure)?;

        // The counter has served its purpose; the lock governs from here
        self.cache
            .delete(&scope.counter_key())
            .await
            .map_err(DomainError::Infrastructure)?;

        info!(
            scope = %scope,
            lock_seconds = self.config.lock_duration_seconds,
            event = "scope_locked",
            "Scope locked after repeated failures"
        );

        Ok(AttemptState::Locked)
    }

    /// Record one outcome against several scopes, returning `true` when any
    /// of them ended up locked
    pub async fn record_all(&self, scopes: &[Scope], succeeded: bool) -> DomainResult<bool> {
        let mut any_locked = false;
        for scope in scopes {
            if self.record_outcome(scope, succeeded).await? == AttemptState::Locked {
                any_locked = true;
            }
        }
        Ok(any_locked)
    }
}
