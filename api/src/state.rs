//! Shared application state

use std::sync::Arc;

use oa_core::cache::CacheStore;
use oa_core::repositories::UserRepository;
use oa_core::services::auth::AuthService;
use oa_core::services::{OtpSender, SessionIssuer};

/// Application state holding the wired authentication service
///
/// Generic over the same seams as the service itself so tests can inject
/// in-memory implementations while production wires Redis, MySQL, and JWT.
pub struct AppState<C, U, S, T>
where
    C: CacheStore,
    U: UserRepository,
    S: OtpSender,
    T: SessionIssuer,
{
    pub auth_service: Arc<AuthService<C, U, S, T>>,
}

impl<C, U, S, T> AppState<C, U, S, T>
where
    C: CacheStore,
    U: UserRepository,
    S: OtpSender,
    T: SessionIssuer,
{
    pub fn new(auth_service: Arc<AuthService<C, U, S, T>>) -> Self {
        Self { auth_service }
    }
}
