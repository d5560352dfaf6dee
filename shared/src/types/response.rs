//! Response types shared between the core flow and the HTTP surface

use serde::{Deserialize, Serialize};

/// Hint returned by the first authentication step telling the client which
/// flow to continue with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Phone already belongs to an account; continue with password login
    Login,
    /// Phone is new; continue with OTP signup
    Signup,
}

impl AuthMode {
    /// String form used in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::Signup => "signup",
        }
    }
}
