//! Mapping of domain errors to HTTP responses
//!
//! Expected flow outcomes keep their own statuses so clients can branch on
//! them: the rate gate answers 429, lockouts 403, a dead code 410 Gone, and
//! credential failures 401. Infrastructure faults collapse to an opaque 500;
//! their detail goes to the log, never to the client.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use oa_core::errors::{AuthError, DomainError};

/// Error body returned for every non-2xx response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// HTTP-facing error wrapper around domain outcomes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request payload rejected before reaching the core flow
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Domain(DomainError::Auth(err))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        ApiError::BadRequest(format!("Invalid value for: {}", fields.join(", ")))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Auth(auth)) => match auth {
                AuthError::OtpAlreadyIssued => StatusCode::TOO_MANY_REQUESTS,
                AuthError::LockedOut => StatusCode::FORBIDDEN,
                AuthError::InvalidOtp
                | AuthError::InvalidSignupToken
                | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::OtpExpired => StatusCode::GONE,
                AuthError::AccountAlreadyExists => StatusCode::CONFLICT,
            },
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "Request failed with an internal error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorBody { detail })
    }
}
