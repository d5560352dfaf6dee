//! Main authentication flow implementation
//!
//! Orchestrates the three-step signup protocol (start, verify, complete) and
//! the password login path. Every credential check is bracketed by the
//! lockout engine: both the per-phone and the per-IP scope must be unlocked
//! before the check runs, and both are charged with its outcome afterwards.

use std::sync::Arc;

use tracing::info;

use oa_shared::utils::phone::{mask_phone, normalize_phone};

use crate::cache::CacheStore;
use crate::domain::entities::user::NewAccount;
use crate::domain::value_objects::SessionTokens;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{CredentialCheck, UserRepository};
use crate::services::lockout::{Flow, LockoutService, Scope};
use crate::services::otp::{IssueOutcome, OtpCheck, OtpSender, OtpService};
use crate::services::session::SessionIssuer;
use crate::services::signup_token::SignupTokenService;

use super::types::{SignupProfile, SignupResult, StartAuthOutcome};

/// Authentication service orchestrating the complete flow
pub struct AuthService<C, U, S, T>
where
    C: CacheStore,
    U: UserRepository,
    S: OtpSender,
    T: SessionIssuer,
{
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// OTP lifecycle management
    otp_service: Arc<OtpService<C, S>>,
    /// One-time signup tokens
    signup_tokens: Arc<SignupTokenService<C>>,
    /// Attempt tracking and lockout
    lockout: Arc<LockoutService<C>>,
    /// Session credential issuance
    session_issuer: Arc<T>,
}

impl<C, U, S, T> AuthService<C, U, S, T>
where
    C: CacheStore,
    U: UserRepository,
    S: OtpSender,
    T: SessionIssuer,
{
    pub fn new(
        user_repository: Arc<U>,
        otp_service: Arc<OtpService<C, S>>,
        signup_tokens: Arc<SignupTokenService<C>>,
        lockout: Arc<LockoutService<C>>,
        session_issuer: Arc<T>,
    ) -> Self {
        Self {
            user_repository,
            otp_service,
            signup_tokens,
            lockout,
            session_issuer,
        }
    }

    fn normalize(phone: &str) -> DomainResult<String> {
        normalize_phone(phone).ok_or_else(|| {
            DomainError::Validation(ValidationError::InvalidPhoneFormat {
                phone: mask_phone(phone),
            })
        })
    }

    fn scopes(flow: Flow, phone: &str, client_ip: &str) -> [Scope; 2] {
        [Scope::user(flow, phone), Scope::ip(flow, client_ip)]
    }

    /// First authentication step: route the client to login or signup
    ///
    /// Existing phones are routed to login without side effects. New phones
    /// pass the lockout check and the one-live-OTP rate gate before a code
    /// is issued and handed to the delivery sink.
    pub async fn start_auth(
        &self,
        phone: &str,
        client_ip: &str,
    ) -> DomainResult<StartAuthOutcome> {
        let phone = Self::normalize(phone)?;

        // Step 1: existing accounts go to login, untouched by signup limits
        if self.user_repository.find_by_phone(&phone).await?.is_some() {
            info!(
                phone = %mask_phone(&phone),
                event = "start_auth_existing",
                "Phone already registered; routing to login"
            );
            return Ok(StartAuthOutcome::ExistingAccount);
        }

        // Step 2: both signup scopes must be unlocked
        let scopes = Self::scopes(Flow::Signup, &phone, client_ip);
        if self.lockout.any_locked(&scopes).await? {
            return Err(AuthError::LockedOut.into());
        }

        // Step 3+4: the rate gate and the write are one conditional set; a
        // live code blocks reissue until it expires, without charging the
        // failure counters
        match self.otp_service.issue(&phone).await? {
            IssueOutcome::Issued => Ok(StartAuthOutcome::OtpSent),
            IssueOutcome::AlreadyActive => Err(AuthError::OtpAlreadyIssued.into()),
        }
    }

    /// Second step: verify a submitted OTP and mint a signup token
    ///
    /// A mismatch charges both scopes; when that tips either into lockout
    /// the response is the lockout rejection, not the mismatch. An expired
    /// or absent code is not an attack signal and leaves the tracker alone.
    pub async fn verify_otp(
        &self,
        phone: &str,
        code: &str,
        client_ip: &str,
    ) -> DomainResult<String> {
        let phone = Self::normalize(phone)?;

        let scopes = Self::scopes(Flow::Signup, &phone, client_ip);
        if self.lockout.any_locked(&scopes).await? {
            return Err(AuthError::LockedOut.into());
        }

        match self.otp_service.verify(&phone, code).await? {
            OtpCheck::Matched => {
                let token = self.signup_tokens.issue(&phone).await?;
                self.lockout.record_all(&scopes, true).await?;
                Ok(token)
            }
            OtpCheck::Mismatched => {
                let newly_locked = self.lockout.record_all(&scopes, false).await?;
                if newly_locked {
                    Err(AuthError::LockedOut.into())
                } else {
                    Err(AuthError::InvalidOtp.into())
                }
            }
            OtpCheck::Expired => Err(AuthError::OtpExpired.into()),
        }
    }

    /// Final step: redeem the signup token and create the account
    ///
    /// The token is consumed by redemption and is not re-issued if account
    /// creation fails afterwards; the client restarts at OTP verification.
    /// Account and profile are created in one transaction by the repository.
    pub async fn complete_signup(
        &self,
        token: &str,
        profile: SignupProfile,
    ) -> DomainResult<SignupResult> {
        let phone = match self.signup_tokens.redeem(token).await? {
            Some(phone) => phone,
            None => return Err(AuthError::InvalidSignupToken.into()),
        };

        let password_hash =
            bcrypt::hash(&profile.password, bcrypt::DEFAULT_COST).map_err(|e| {
                DomainError::Internal {
                    message: format!("password hashing failed: {}", e),
                }
            })?;

        let user = self
            .user_repository
            .create_account(NewAccount {
                phone: phone.clone(),
                first_name: profile.first_name,
                last_name: profile.last_name,
                email: profile.email,
                password_hash,
            })
            .await?;

        info!(
            phone = %mask_phone(&phone),
            user_id = %user.id,
            event = "signup_completed",
            "Account created"
        );

        let tokens = self.session_issuer.issue(&user).await?;
        Ok(SignupResult { user, tokens })
    }

    /// Password login for registered phones
    ///
    /// The credential check is delegated to the repository, which returns an
    /// explicit classification; both failure classes are charged against the
    /// login scopes, and a freshly tripped lockout takes precedence over the
    /// credential error in the response.
    pub async fn login(
        &self,
        phone: &str,
        password: &str,
        client_ip: &str,
    ) -> DomainResult<SessionTokens> {
        let phone = Self::normalize(phone)?;

        let scopes = Self::scopes(Flow::Login, &phone, client_ip);
        if self.lockout.any_locked(&scopes).await? {
            return Err(AuthError::LockedOut.into());
        }

        match self.user_repository.check_password(&phone, password).await? {
            CredentialCheck::Valid(user) => {
                self.lockout.record_all(&scopes, true).await?;
                info!(
                    phone = %mask_phone(&phone),
                    user_id = %user.id,
                    event = "login_succeeded",
                    "User authenticated"
                );
                self.session_issuer.issue(&user).await
            }
            CredentialCheck::InvalidPassword | CredentialCheck::UnknownPhone => {
                let newly_locked = self.lockout.record_all(&scopes, false).await?;
                if newly_locked {
                    Err(AuthError::LockedOut.into())
                } else {
                    Err(AuthError::InvalidCredentials.into())
                }
            }
        }
    }
}
