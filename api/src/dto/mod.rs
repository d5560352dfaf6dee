//! Request and response data transfer objects

pub mod auth;

pub use auth::{
    CompleteSignupRequest, CompleteSignupResponse, LoginRequest, SessionResponse,
    StartAuthRequest, StartAuthResponse, VerifyOtpRequest, VerifyOtpResponse,
};
