//! Business services

pub mod auth;
pub mod lockout;
pub mod otp;
pub mod session;
pub mod signup_token;

pub use auth::AuthService;
pub use lockout::{AttemptState, Dimension, Flow, LockoutService, Scope};
pub use otp::{IssueOutcome, OtpCheck, OtpSender, OtpService};
pub use session::SessionIssuer;
pub use signup_token::SignupTokenService;
