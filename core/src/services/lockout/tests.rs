//! Unit tests for the lockout engine

use std::sync::Arc;

use async_trait::async_trait;

use oa_shared::config::LockoutConfig;

use crate::cache::{CacheStore, InMemoryCache};
use crate::clock::ManualClock;
use crate::errors::DomainError;

use super::{AttemptState, Dimension, Flow, LockoutService, Scope};

fn service() -> (LockoutService<InMemoryCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let cache = Arc::new(InMemoryCache::with_clock(clock.clone()));
    (LockoutService::new(cache, LockoutConfig::default()), clock)
}

fn phone_scope() -> Scope {
    Scope::user(Flow::Signup, "+989121234567")
}

#[tokio::test]
async fn test_scope_starts_clean() {
    let (service, _clock) = service();
    assert!(!service.is_locked(&phone_scope()).await.unwrap());
}

#[tokio::test]
async fn test_three_failures_lock_the_scope() {
    let (service, _clock) = service();
    let scope = phone_scope();

    assert_eq!(
        service.record_outcome(&scope, false).await.unwrap(),
        AttemptState::Warned(1)
    );
    assert_eq!(
        service.record_outcome(&scope, false).await.unwrap(),
        AttemptState::Warned(2)
    );
    assert!(!service.is_locked(&scope).await.unwrap());

    assert_eq!(
        service.record_outcome(&scope, false).await.unwrap(),
        AttemptState::Locked
    );
    assert!(service.is_locked(&scope).await.unwrap());
}

#[tokio::test]
async fn test_success_resets_the_counter() {
    let (service, _clock) = service();
    let scope = phone_scope();

    service.record_outcome(&scope, false).await.unwrap();
    service.record_outcome(&scope, false).await.unwrap();
    assert_eq!(
        service.record_outcome(&scope, true).await.unwrap(),
        AttemptState::Clean
    );

    // The streak starts over
    assert_eq!(
        service.record_outcome(&scope, false).await.unwrap(),
        AttemptState::Warned(1)
    );
}

#[tokio::test]
async fn test_lock_expires_after_configured_duration() {
    let (service, clock) = service();
    let scope = phone_scope();

    for _ in 0..3 {
        service.record_outcome(&scope, false).await.unwrap();
    }
    assert!(service.is_locked(&scope).await.unwrap());

    clock.advance_seconds(3599);
    assert!(service.is_locked(&scope).await.unwrap());

    clock.advance_seconds(2);
    assert!(!service.is_locked(&scope).await.unwrap());

    // Back to clean accounting after release
    assert_eq!(
        service.record_outcome(&scope, false).await.unwrap(),
        AttemptState::Warned(1)
    );
}

#[tokio::test]
async fn test_lock_survives_counter_reset() {
    let (service, _clock) = service();
    let scope = phone_scope();

    for _ in 0..3 {
        service.record_outcome(&scope, false).await.unwrap();
    }

    // A success clears the counter but the lock marker stands
    service.record_outcome(&scope, true).await.unwrap();
    assert!(service.is_locked(&scope).await.unwrap());
}

#[tokio::test]
async fn test_scopes_are_independent() {
    let (service, _clock) = service();
    let phone = phone_scope();
    let ip = Scope::ip(Flow::Signup, "203.0.113.9");

    for _ in 0..3 {
        service.record_outcome(&phone, false).await.unwrap();
    }
    assert!(service.is_locked(&phone).await.unwrap());
    assert!(!service.is_locked(&ip).await.unwrap());

    // Same value in a different flow is a different scope
    let login_phone = Scope::user(Flow::Login, "+989121234567");
    assert!(!service.is_locked(&login_phone).await.unwrap());
    assert_eq!(login_phone.dimension, Dimension::User);
}

#[tokio::test]
async fn test_any_locked_over_pair() {
    let (service, _clock) = service();
    let phone = phone_scope();
    let ip = Scope::ip(Flow::Signup, "203.0.113.9");

    assert!(!service
        .any_locked(&[phone.clone(), ip.clone()])
        .await
        .unwrap());

    for _ in 0..3 {
        service.record_outcome(&ip, false).await.unwrap();
    }
    assert!(service.any_locked(&[phone, ip]).await.unwrap());
}

#[tokio::test]
async fn test_record_all_reports_new_lock() {
    let (service, _clock) = service();
    let phone = phone_scope();
    let ip = Scope::ip(Flow::Signup, "203.0.113.9");
    let scopes = [phone, ip];

    assert!(!service.record_all(&scopes, false).await.unwrap());
    assert!(!service.record_all(&scopes, false).await.unwrap());
    // Third failure locks both scopes at once
    assert!(service.record_all(&scopes, false).await.unwrap());
}

/// Cache whose deletes always fail, for exercising error propagation
struct DeleteFailsCache {
    inner: InMemoryCache,
}

#[async_trait]
impl CacheStore for DeleteFailsCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.inner.set(key, value, ttl_seconds).await
    }

    async fn delete(&self, _key: &str) -> Result<(), String> {
        Err("cache unreachable".to_string())
    }

    async fn get_and_delete(&self, key: &str) -> Result<Option<String>, String> {
        self.inner.get_and_delete(key).await
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, String> {
        self.inner.set_if_absent(key, value, ttl_seconds).await
    }

    async fn increment_or_init(&self, key: &str, ttl_seconds: u64) -> Result<i64, String> {
        self.inner.increment_or_init(key, ttl_seconds).await
    }
}

#[tokio::test]
async fn test_counter_delete_failure_surfaces_as_error() {
    let cache = Arc::new(DeleteFailsCache {
        inner: InMemoryCache::new(),
    });
    let service = LockoutService::new(cache, LockoutConfig::default());
    let scope = phone_scope();

    service.record_outcome(&scope, false).await.unwrap();
    service.record_outcome(&scope, false).await.unwrap();

    // The third failure sets the lock, then fails deleting the counter
    let err = service.record_outcome(&scope, false).await.unwrap_err();
    assert!(matches!(err, DomainError::Infrastructure(_)));

    // The lock write landed before the failed delete
    assert!(service.is_locked(&scope).await.unwrap());

    // Clearing the counter on success propagates the same way
    let err = service.record_outcome(&scope, true).await.unwrap_err();
    assert!(matches!(err, DomainError::Infrastructure(_)));
}

#[tokio::test]
async fn test_failure_counter_decays() {
    let (service, clock) = service();
    let scope = phone_scope();

    service.record_outcome(&scope, false).await.unwrap();
    service.record_outcome(&scope, false).await.unwrap();

    // Counter TTL (1h) elapses without further failures
    clock.advance_seconds(3601);
    assert_eq!(
        service.record_outcome(&scope, false).await.unwrap(),
        AttemptState::Warned(1)
    );
}
