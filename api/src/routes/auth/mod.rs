//! Authentication endpoints
//!
//! - `POST /api/v1/auth/start` - route a phone to login or signup
//! - `POST /api/v1/auth/verify-otp` - verify a code, mint a signup token
//! - `POST /api/v1/auth/complete-signup` - redeem the token, create the account
//! - `POST /api/v1/auth/login` - password login

pub mod complete_signup;
pub mod login;
pub mod start;
pub mod verify_otp;

use actix_web::{web, HttpRequest};

use oa_core::cache::CacheStore;
use oa_core::repositories::UserRepository;
use oa_core::services::{OtpSender, SessionIssuer};

/// Register the authentication routes under `/api/v1/auth`
pub fn configure<C, U, S, T>(cfg: &mut web::ServiceConfig)
where
    C: CacheStore + 'static,
    U: UserRepository + 'static,
    S: OtpSender + 'static,
    T: SessionIssuer + 'static,
{
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/start", web::post().to(start::start_auth::<C, U, S, T>))
            .route(
                "/verify-otp",
                web::post().to(verify_otp::verify_otp::<C, U, S, T>),
            )
            .route(
                "/complete-signup",
                web::post().to(complete_signup::complete_signup::<C, U, S, T>),
            )
            .route("/login", web::post().to(login::login::<C, U, S, T>)),
    );
}

/// Extract the client IP used for the per-IP lockout scope
///
/// The first entry of `X-Forwarded-For` wins when the service sits behind a
/// proxy; otherwise the peer address is used directly.
pub(crate) fn extract_client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded) = req.headers().get("X-Forwarded-For") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
