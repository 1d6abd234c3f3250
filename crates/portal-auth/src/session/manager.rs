//! Session lifecycle manager — login, logout, refresh flows.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_entity::session::Session;
use portal_entity::user::User;

use crate::directory::UserStore;
use crate::jwt::encoder::TokenPair;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::principal::Principal;

use super::store::SessionStore;

/// Result of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// Created session.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Session persistence.
    session_store: Arc<SessionStore>,
    /// User directory.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        session_store: Arc<SessionStore>,
        users: Arc<dyn UserStore>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            session_store,
            users,
            password_hasher,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Look up the user by email
    /// 2. Check account status
    /// 3. Verify the password
    /// 4. Create a session and mint the token pair
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response does not reveal which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .ok_or_else(|| AppError::credential_invalid("Invalid email or password"))?;

        if !user.can_login() {
            warn!(user_id = %user.id, "Login attempt on deactivated account");
            return Err(AppError::resource_forbidden(
                "Account is deactivated. Contact an administrator.",
            ));
        }

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::credential_invalid("Invalid email or password"));
        }

        let result = self.open_session(&user).await?;

        self.users.touch_last_login(user.id, Utc::now()).await;

        info!(
            user_id = %user.id,
            session_id = %result.session.id,
            role = %user.role,
            "Login successful"
        );

        Ok(result)
    }

    /// Revokes the principal's current session. Idempotent: logging out
    /// twice is a no-op the second time.
    pub async fn logout(&self, principal: &Principal) -> Result<(), AppError> {
        self.session_store
            .revoke(principal.session_id, Some(principal.id), "User logout")
            .await;

        info!(
            user_id = %principal.id,
            session_id = %principal.session_id,
            "Logout completed"
        );

        Ok(())
    }

    /// Exchanges a refresh token for a fresh session and token pair.
    ///
    /// The old session is left untouched: it stays independently
    /// revocable and dies on its own clock. The user is re-read so the
    /// new tokens reflect any role or region change since login.
    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginResult, AppError> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;
        let session_id = claims.session_id();

        if !self.session_store.is_refreshable(session_id).await {
            return Err(AppError::credential_invalid(
                "Session has been revoked or expired",
            ));
        }

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await
            .ok_or_else(|| AppError::credential_invalid("User not found"))?;

        if !user.can_login() {
            return Err(AppError::resource_forbidden(
                "Account is deactivated. Contact an administrator.",
            ));
        }

        let result = self.open_session(&user).await?;

        info!(
            user_id = %user.id,
            old_session_id = %session_id,
            new_session_id = %result.session.id,
            "Token refreshed"
        );

        Ok(result)
    }

    /// Revokes every session belonging to a user — "logout everywhere"
    /// and security incident response. Any in-flight request holding one
    /// of these sessions fails on its next principal resolution.
    pub async fn revoke_all_user_sessions(
        &self,
        user_id: Uuid,
        revoked_by: Uuid,
        reason: &str,
    ) -> Result<u32, AppError> {
        let revoked = self
            .session_store
            .revoke_all(user_id, Some(revoked_by), reason)
            .await;

        info!(
            user_id = %user_id,
            revoked_by = %revoked_by,
            count = revoked,
            reason = %reason,
            "Revoked all user sessions"
        );

        Ok(revoked)
    }

    /// Creates the session record and mints tokens bound to it.
    async fn open_session(&self, user: &User) -> Result<LoginResult, AppError> {
        let session_id = Uuid::new_v4();
        let tokens = self.jwt_encoder.generate_token_pair(user, session_id)?;

        let session = self
            .session_store
            .create(
                session_id,
                user.id,
                &fingerprint(&tokens.access_token),
                Some(&fingerprint(&tokens.refresh_token)),
            )
            .await;

        Ok(LoginResult {
            tokens,
            session,
            user: user.clone(),
        })
    }
}

/// Computes a SHA-256 fingerprint of a token, hex-encoded.
fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = fingerprint("token");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        // Stable across calls.
        assert_eq!(fp, fingerprint("token"));
        assert_ne!(fp, fingerprint("other"));
    }
}
