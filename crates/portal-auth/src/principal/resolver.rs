//! Turns a bearer credential into an authenticated [`Principal`].

use std::sync::Arc;

use portal_core::error::AppError;

use crate::jwt::JwtDecoder;
use crate::session::SessionStore;

use super::model::Principal;

/// Resolves bearer credentials into principals.
///
/// Verification is two-step: the token must decode and the session it
/// names must still be live in the store. The second step is what makes
/// "logout everywhere" observable on the very next request of any
/// in-flight session — a revoked session fails here, never a stale
/// success.
#[derive(Clone)]
pub struct PrincipalResolver {
    /// Token verification.
    jwt_decoder: Arc<JwtDecoder>,
    /// Session liveness checks.
    session_store: Arc<SessionStore>,
}

impl std::fmt::Debug for PrincipalResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrincipalResolver").finish()
    }
}

impl PrincipalResolver {
    /// Creates a new resolver.
    pub fn new(jwt_decoder: Arc<JwtDecoder>, session_store: Arc<SessionStore>) -> Self {
        Self {
            jwt_decoder,
            session_store,
        }
    }

    /// Resolves an `Authorization` header value into a principal.
    ///
    /// `None` or a non-Bearer value is a missing credential; everything
    /// else goes through full token + session verification.
    pub async fn resolve_bearer(&self, header: Option<&str>) -> Result<Principal, AppError> {
        let header = header.ok_or_else(|| {
            AppError::credential_missing("Missing Authorization header")
        })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::credential_missing("Authorization header is not a Bearer credential")
        })?;

        self.resolve(token).await
    }

    /// Resolves a raw access token into a principal.
    pub async fn resolve(&self, token: &str) -> Result<Principal, AppError> {
        let claims = self.jwt_decoder.decode_access_token(token)?;

        if !self.session_store.is_valid(claims.session_id()).await {
            return Err(AppError::credential_invalid(
                "Session has been revoked or expired",
            ));
        }

        Ok(Principal::from_claims(&claims))
    }
}
