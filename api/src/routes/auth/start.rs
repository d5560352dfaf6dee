//! Handler for POST /api/v1/auth/start

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::debug;
use validator::Validate;

use oa_core::cache::CacheStore;
use oa_core::repositories::UserRepository;
use oa_core::services::auth::StartAuthOutcome;
use oa_core::services::{OtpSender, SessionIssuer};
use oa_shared::types::response::AuthMode;
use oa_shared::utils::phone::mask_phone;

use crate::dto::auth::{StartAuthRequest, StartAuthResponse};
use crate::handlers::ApiError;
use crate::state::AppState;

use super::extract_client_ip;

/// First authentication step
///
/// Answers with `mode: "login"` for registered phones and sends an OTP for
/// new ones. A live unexpired code answers 429; a locked scope answers 403.
pub async fn start_auth<C, U, S, T>(
    req: HttpRequest,
    state: web::Data<AppState<C, U, S, T>>,
    request: web::Json<StartAuthRequest>,
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
        "Processing start_auth request"
    );

    let outcome = state
        .auth_service
        .start_auth(&request.phone, &client_ip)
        .await?;

    let response = match outcome {
        StartAuthOutcome::ExistingAccount => StartAuthResponse {
            detail: "Phone number already registered; proceed to login".to_string(),
            mode: AuthMode::Login,
        },
        StartAuthOutcome::OtpSent => StartAuthResponse {
            detail: "Verification code sent".to_string(),
            mode: AuthMode::Signup,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}
