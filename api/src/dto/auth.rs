//! Authentication request and response payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use oa_shared::types::response::AuthMode;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartAuthRequest {
    /// Phone number in local (09...) or E.164 (+989...) form
    #[validate(length(min = 7, max = 16))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartAuthResponse {
    pub detail: String,
    /// Which flow the client should continue with
    pub mode: AuthMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 7, max = 16))]
    pub phone: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub detail: String,
    /// One-time signup token to present at the completion step
    pub tmp_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteSignupRequest {
    /// Signup token returned by OTP verification
    #[validate(length(min = 1, max = 36))]
    pub tmp_token: String,

    #[validate(length(min = 1, max = 30))]
    pub first_name: String,

    #[validate(length(min = 1, max = 30))]
    pub last_name: String,

    #[validate(email, length(max = 254))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteSignupResponse {
    pub detail: String,
    pub user_id: String,
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 7, max = 16))]
    pub phone: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access: String,
    pub refresh: String,
}
