//! Session persistence seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use portal_entity::session::Session;

/// Abstract session persistence.
///
/// Implementations must make `revoke` atomic per session ID: a revoke
/// racing a concurrent read either fully lands or not at all, and once
/// it lands every subsequent read observes `revoked = true`.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Store a new session.
    async fn insert(&self, session: Session);

    /// Fetch a session by ID.
    async fn get(&self, id: Uuid) -> Option<Session>;

    /// All sessions belonging to a user.
    async fn find_by_user(&self, user_id: Uuid) -> Vec<Session>;

    /// All currently active sessions (admin view).
    async fn find_all_active(&self) -> Vec<Session>;

    /// Mark a session revoked. Idempotent: revoking an already-revoked
    /// session keeps the original revocation record. Returns `false`
    /// only when the session does not exist.
    async fn revoke(
        &self,
        id: Uuid,
        revoked_by: Option<Uuid>,
        reason: &str,
        at: DateTime<Utc>,
    ) -> bool;

    /// Remove sessions whose refresh window closed before `cutoff`.
    /// Returns how many were removed.
    async fn remove_expired(&self, cutoff: DateTime<Utc>) -> u64;
}
