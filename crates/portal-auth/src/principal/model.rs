//! The authenticated principal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_core::Region;
use portal_entity::user::Role;

use crate::jwt::Claims;

/// The authenticated actor behind the current request.
///
/// Built per-request from verified token claims, immutable for the
/// request's lifetime, and never persisted. Carries everything the
/// authorization engine needs so no further lookups happen on the
/// decision path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// The user's ID.
    pub id: Uuid,
    /// The user's role.
    pub role: Role,
    /// Home region, if the user is region-affiliated.
    pub region: Option<Region>,
    /// All regions the user may see region-scoped content for.
    pub accessible_regions: HashSet<Region>,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Whether TOTP two-factor auth is enabled.
    pub totp_enabled: bool,
    /// The session this request is authenticated under.
    pub session_id: Uuid,
}

impl Principal {
    /// Builds a principal from verified token claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
            region: claims.region.clone(),
            accessible_regions: claims.regions.iter().cloned().collect(),
            email_verified: claims.email_verified,
            totp_enabled: claims.totp_enabled,
            session_id: claims.sid,
        }
    }

    /// Whether this principal is globally privileged (owner or secretariat).
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
