//! JWT implementation of the session credential issuer
//!
//! Produces an HS256-signed access/refresh pair. The two tokens share the
//! claim shape and differ in the `typ` claim and expiry so the API layer can
//! reject a refresh token presented as an access token.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use oa_core::domain::entities::user::UserAccount;
use oa_core::domain::value_objects::SessionTokens;
use oa_core::errors::DomainError;
use oa_core::services::SessionIssuer;
use oa_shared::config::JwtConfig;

/// Claims carried by both session token kinds
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user id)
    pub sub: String,
    /// Expiry as a Unix timestamp
    pub exp: i64,
    /// Issued-at as a Unix timestamp
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Token kind: "access" or "refresh"
    pub typ: String,
    /// Unique token id
    pub jti: String,
}

/// Session issuer producing HS256-signed JWT pairs
pub struct JwtSessionIssuer {
    encoding_key: EncodingKey,
    config: JwtConfig,
}

impl JwtSessionIssuer {
    pub fn new(config: JwtConfig) -> Self {
        if config.is_using_default_secret() {
            warn!("JWT_SECRET is unset; sessions are signed with the development secret");
        }
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            config,
        }
    }

    fn encode_token(&self, user_id: Uuid, kind: &str, ttl_seconds: i64) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            typ: kind.to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to sign {} token: {}", kind, e),
            }
        })
    }
}

#[async_trait]
impl SessionIssuer for JwtSessionIssuer {
    async fn issue(&self, user: &UserAccount) -> Result<SessionTokens, DomainError> {
        let access_token = self.encode_token(user.id, "access", self.config.access_token_expiry)?;
        let refresh_token =
            self.encode_token(user.id, "refresh", self.config.refresh_token_expiry)?;

        Ok(SessionTokens {
            access_token,
            refresh_token,
        })
    }
}
