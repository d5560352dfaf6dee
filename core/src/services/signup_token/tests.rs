//! Unit tests for the signup token service

use std::sync::Arc;

use oa_shared::config::OtpConfig;

use crate::cache::InMemoryCache;
use crate::clock::ManualClock;

use super::SignupTokenService;

fn service() -> (SignupTokenService<InMemoryCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let cache = Arc::new(InMemoryCache::with_clock(clock.clone()));
    (SignupTokenService::new(cache, OtpConfig::default()), clock)
}

const PHONE: &str = "+989121234567";

#[tokio::test]
async fn test_redeem_returns_bound_phone_exactly_once() {
    let (service, _clock) = service();

    let token = service.issue(PHONE).await.unwrap();
    assert_eq!(
        service.redeem(&token).await.unwrap(),
        Some(PHONE.to_string())
    );
    // Single use: the second redemption finds nothing
    assert_eq!(service.redeem(&token).await.unwrap(), None);
}

#[tokio::test]
async fn test_tokens_are_distinct_and_unguessable_in_shape() {
    let (service, _clock) = service();

    let a = service.issue(PHONE).await.unwrap();
    let b = service.issue(PHONE).await.unwrap();
    assert_ne!(a, b);
    assert_eq!(a.len(), 36); // UUID text form
}

#[tokio::test]
async fn test_redeem_after_ttl_returns_none() {
    let (service, clock) = service();

    let token = service.issue(PHONE).await.unwrap();
    clock.advance_seconds(601);
    assert_eq!(service.redeem(&token).await.unwrap(), None);
}

#[tokio::test]
async fn test_redeem_unknown_token_returns_none() {
    let (service, _clock) = service();
    assert_eq!(
        service.redeem("11111111-2222-3333-4444-555555555555").await.unwrap(),
        None
    );
}
