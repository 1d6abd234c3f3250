//! In-memory session backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use portal_entity::session::Session;

use super::backend::SessionBackend;

/// DashMap-backed session storage.
///
/// DashMap locks per entry, which gives the atomicity the backend
/// contract requires: a `revoke` holds the entry's write lock for the
/// whole mutation, so a concurrent `get` sees either the old record or
/// the fully revoked one, never a partial write.
#[derive(Debug, Default)]
pub struct MemorySessionBackend {
    sessions: DashMap<Uuid, Session>,
}

impl MemorySessionBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

#[async_trait]
impl SessionBackend for MemorySessionBackend {
    async fn insert(&self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    async fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.get(&id).map(|entry| entry.clone())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Vec<Session> {
        self.sessions
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect()
    }

    async fn find_all_active(&self) -> Vec<Session> {
        self.sessions
            .iter()
            .filter(|entry| entry.is_active())
            .map(|entry| entry.clone())
            .collect()
    }

    async fn revoke(
        &self,
        id: Uuid,
        revoked_by: Option<Uuid>,
        reason: &str,
        at: DateTime<Utc>,
    ) -> bool {
        match self.sessions.get_mut(&id) {
            Some(mut entry) => {
                if !entry.revoked {
                    entry.revoked = true;
                    entry.revoked_at = Some(at);
                    entry.revoked_by = revoked_by;
                    entry.revoked_reason = Some(reason.to_string());
                }
                true
            }
            None => false,
        }
    }

    async fn remove_expired(&self, cutoff: DateTime<Utc>) -> u64 {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.refresh_expires_at > cutoff);
        before.saturating_sub(self.sessions.len()) as u64
    }
}
