//! Handler for POST /api/v1/auth/verify-otp

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::debug;
use validator::Validate;

use oa_core::cache::CacheStore;
use oa_core::repositories::UserRepository;
use oa_core::services::{OtpSender, SessionIssuer};
use oa_shared::utils::phone::mask_phone;

use crate::dto::auth::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::ApiError;
use crate::state::AppState;

use super::extract_client_ip;

/// Second authentication step
///
/// A correct code consumes the OTP and answers with a one-time signup
/// token. A wrong code answers 401 (or 403 when it trips the lockout); an
/// expired or absent code answers 410 Gone without charging the tracker.
pub async fn verify_otp<C, U, S, T>(
    req: HttpRequest,
    state: web::Data<AppState<C, U, S, T>>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    C: CacheStore + 'static,
    U: UserRepository + 'static,
    S: OtpSender + 'static,
    T: SessionIssuer + 'static,
{
    request.validate()?;
    let client_ip = extract_client_ip(&req);

    debug!(
        phone = %mask_phone(&request.phone),
        client_ip = %client_ip,
        "Processing verify_otp request"
    );

    let token = state
        .auth_service
        .verify_otp(&request.phone, &request.otp, &client_ip)
        .await?;

    Ok(HttpResponse::Ok().json(VerifyOtpResponse {
        detail: "Phone number verified".to_string(),
        tmp_token: token,
    }))
}
