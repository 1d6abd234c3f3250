//! Seam to the user persistence layer.
//!
//! The auth crate never talks to storage directly; the service crate
//! provides the concrete directory (in-memory here, a database in the
//! production deployment) behind this trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use portal_entity::user::User;

/// Read access to user accounts, as needed by the session lifecycle.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by login email.
    async fn find_by_email(&self, email: &str) -> Option<User>;

    /// Look up a user by ID.
    async fn find_by_id(&self, id: Uuid) -> Option<User>;

    /// Record a successful login.
    async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>);
}
