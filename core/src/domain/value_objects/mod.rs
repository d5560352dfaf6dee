//! Value objects shared by services

use serde::{Deserialize, Serialize};

/// Opaque session credential pair issued for an authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
}
