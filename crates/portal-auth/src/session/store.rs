//! Session storage operations wrapping a [`SessionBackend`].

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use portal_core::config::auth::AuthConfig;
use portal_entity::session::Session;

use super::backend::SessionBackend;

/// Owns the session lifecycle state.
///
/// All session mutation in the portal goes through this store; the
/// authorization engine and the services only ever read.
#[derive(Clone)]
pub struct SessionStore {
    /// Session persistence.
    backend: Arc<dyn SessionBackend>,
    /// Access window length in minutes.
    access_ttl_minutes: i64,
    /// Refresh window length in hours.
    refresh_ttl_hours: i64,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish()
    }
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(backend: Arc<dyn SessionBackend>, config: &AuthConfig) -> Self {
        Self {
            backend,
            access_ttl_minutes: config.jwt_access_ttl_minutes as i64,
            refresh_ttl_hours: config.jwt_refresh_ttl_hours as i64,
        }
    }

    /// Creates a new session record for a user.
    ///
    /// The caller supplies the session ID so tokens can be minted with
    /// it before the record lands. The access window is short; the
    /// refresh window outlives it so the session can be re-tokened
    /// without re-authentication.
    pub async fn create(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        token_fingerprint: &str,
        refresh_fingerprint: Option<&str>,
    ) -> Session {
        let now = Utc::now();
        let session = Session {
            id: session_id,
            user_id,
            token_fingerprint: token_fingerprint.to_string(),
            refresh_fingerprint: refresh_fingerprint.map(String::from),
            created_at: now,
            expires_at: now + Duration::minutes(self.access_ttl_minutes),
            refresh_expires_at: now + Duration::hours(self.refresh_ttl_hours),
            revoked: false,
            revoked_at: None,
            revoked_by: None,
            revoked_reason: None,
        };

        self.backend.insert(session.clone()).await;
        session
    }

    /// Fetches a session by ID.
    pub async fn find(&self, session_id: Uuid) -> Option<Session> {
        self.backend.get(session_id).await
    }

    /// Marks a session revoked. Idempotent: a second revoke of the same
    /// session is a no-op success, and `is_valid` reports `false` after
    /// either call.
    pub async fn revoke(&self, session_id: Uuid, revoked_by: Option<Uuid>, reason: &str) {
        self.backend
            .revoke(session_id, revoked_by, reason, Utc::now())
            .await;
    }

    /// Revokes every session belonging to a user ("logout everywhere").
    /// Returns how many live sessions were revoked.
    pub async fn revoke_all(
        &self,
        user_id: Uuid,
        revoked_by: Option<Uuid>,
        reason: &str,
    ) -> u32 {
        let sessions = self.backend.find_by_user(user_id).await;
        let mut revoked = 0u32;

        for session in sessions {
            if session.revoked {
                continue;
            }
            if self
                .backend
                .revoke(session.id, revoked_by, reason, Utc::now())
                .await
            {
                revoked += 1;
            }
        }

        revoked
    }

    /// Whether the session exists, is unrevoked, and its access window
    /// is still open.
    pub async fn is_valid(&self, session_id: Uuid) -> bool {
        match self.backend.get(session_id).await {
            Some(session) => session.is_active(),
            None => false,
        }
    }

    /// Whether the session exists, is unrevoked, and its refresh window
    /// is still open.
    pub async fn is_refreshable(&self, session_id: Uuid) -> bool {
        match self.backend.get(session_id).await {
            Some(session) => !session.revoked && !session.is_refresh_expired(),
            None => false,
        }
    }

    /// All currently active sessions (admin view).
    pub async fn list_active(&self) -> Vec<Session> {
        self.backend.find_all_active().await
    }

    /// Drops sessions whose refresh window has closed.
    pub async fn purge_expired(&self) -> u64 {
        self.backend.remove_expired(Utc::now()).await
    }
}
