//! Handler for POST /api/v1/auth/login

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::debug;
use validator::Validate;

use oa_core::cache::CacheStore;
use oa_core::repositories::UserRepository;
use oa_core::services::{OtpSender, SessionIssuer};
use oa_shared::utils::phone::mask_phone;

use crate::dto::auth::{LoginRequest, SessionResponse};
use crate::handlers::ApiError;
use crate::state::AppState;

use super::extract_client_ip;

/// Password login for registered phones
///
/// An unknown phone and a wrong password answer the same 401 so the
/// endpoint does not reveal which phones are registered; a tripped lockout
/// answers 403.
pub async fn login<C, U, S, T>(
    req: HttpRequest,
    state: web::Data<AppState<C, U, S, T>>,
    request: web::Json<LoginRequest>,
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
        "Processing login request"
    );

    let tokens = state
        .auth_service
        .login(&request.phone, &request.password, &client_ip)
        .await?;

    Ok(HttpResponse::Ok().json(SessionResponse {
        access: tokens.access_token,
        refresh: tokens.refresh_token,
    }))
}
