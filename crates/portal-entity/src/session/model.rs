//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user session.
///
/// Sessions are created on login and revoked on logout, expiry, or
/// administrative action. A token refresh creates a *new* session; the
/// old one stays independently revocable until its own clock runs out.
/// Sessions are owned by the session store — nothing else mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 fingerprint of the access token.
    pub token_fingerprint: String,
    /// SHA-256 fingerprint of the refresh token (if issued).
    pub refresh_fingerprint: Option<String>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the access window closes.
    pub expires_at: DateTime<Utc>,
    /// When the refresh window closes.
    pub refresh_expires_at: DateTime<Utc>,
    /// Whether the session has been revoked.
    pub revoked: bool,
    /// When the session was revoked.
    pub revoked_at: Option<DateTime<Utc>>,
    /// Who revoked the session (the user on logout, an admin otherwise).
    pub revoked_by: Option<Uuid>,
    /// Reason for revocation.
    pub revoked_reason: Option<String>,
}

impl Session {
    /// Check whether the access window is still open and the session
    /// has not been revoked.
    pub fn is_active(&self) -> bool {
        !self.revoked && self.expires_at > Utc::now()
    }

    /// Check whether the access window has closed.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Check whether the refresh window has closed.
    pub fn is_refresh_expired(&self) -> bool {
        self.refresh_expires_at <= Utc::now()
    }
}
