//! Expired session cleanup.

use std::sync::Arc;

use tracing::info;

use portal_core::error::AppError;

use super::store::SessionStore;

/// Handles periodic cleanup of sessions past their refresh window.
///
/// Revoked-but-unexpired sessions are kept: their record is what makes
/// `is_valid` deny an in-flight token, so they may only be dropped once
/// the refresh window has closed and no token for them can verify.
#[derive(Clone)]
pub struct SessionCleanup {
    /// Session store to purge.
    session_store: Arc<SessionStore>,
}

impl std::fmt::Debug for SessionCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCleanup").finish()
    }
}

impl SessionCleanup {
    /// Creates a new session cleanup handler.
    pub fn new(session_store: Arc<SessionStore>) -> Self {
        Self { session_store }
    }

    /// Runs a cleanup cycle. Returns the number of sessions dropped.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let purged = self.session_store.purge_expired().await;

        if purged > 0 {
            info!(purged, "Session cleanup completed");
        }

        Ok(purged)
    }
}
