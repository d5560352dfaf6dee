//! Handler for POST /api/v1/auth/complete-signup

use actix_web::{web, HttpResponse};
use validator::Validate;

use oa_core::cache::CacheStore;
use oa_core::repositories::UserRepository;
use oa_core::services::auth::SignupProfile;
use oa_core::services::{OtpSender, SessionIssuer};

use crate::dto::auth::{CompleteSignupRequest, CompleteSignupResponse};
use crate::handlers::ApiError;
use crate::state::AppState;

/// Final signup step
///
/// Redeems the one-time signup token and creates the account together with
/// its profile, answering 201 with the first session pair. An absent,
/// expired, or already-used token answers 401.
pub async fn complete_signup<C, U, S, T>(
    state: web::Data<AppState<C, U, S, T>>,
    request: web::Json<CompleteSignupRequest>,
) -> Result<HttpResponse, ApiError>
where
    C: CacheStore + 'static,
    U: UserRepository + 'static,
    S: OtpSender + 'static,
    T: SessionIssuer + 'static,
{
    request.validate()?;
    let request = request.into_inner();

    let result = state
        .auth_service
        .complete_signup(
            &request.tmp_token,
            SignupProfile {
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                password: request.password,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(CompleteSignupResponse {
        detail: "Account created".to_string(),
        user_id: result.user.id.to_string(),
        access: result.tokens.access_token,
        refresh: result.tokens.refresh_token,
    }))
}
