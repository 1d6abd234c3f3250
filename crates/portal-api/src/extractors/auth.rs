//! `AuthPrincipal` extractor — resolves the bearer credential into a
//! [`Principal`] and hands it to the handler.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use portal_auth::principal::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated principal available in handlers.
///
/// When a route guard already resolved the principal, the cached copy in
/// the request extensions is reused; otherwise the extractor performs
/// the full resolution itself (token verification + session check).
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

impl std::ops::Deref for AuthPrincipal {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(AuthPrincipal(principal.clone()));
        }

        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let principal = state.principal_resolver.resolve_bearer(header).await?;
        Ok(AuthPrincipal(principal))
    }
}
