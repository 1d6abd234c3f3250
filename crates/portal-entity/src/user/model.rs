//! User entity model.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_core::Region;

use super::role::Role;
use super::status::UserStatus;

/// A portal user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email address (unique).
    pub email: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Argon2id hash of the password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// The user's role in the portal.
    pub role: Role,
    /// Home region, if the user is region-affiliated.
    ///
    /// Owners and secretariat staff may be region-less; company admins
    /// and students normally carry their company's region.
    pub region: Option<Region>,
    /// Additional regions this user may see region-scoped content for.
    pub accessible_regions: HashSet<Region>,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Whether TOTP two-factor auth is enabled.
    pub totp_enabled: bool,
    /// Account status.
    pub status: UserStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Last successful login, if any.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// All regions this user can see region-scoped content for:
    /// the home region plus any explicitly granted regions.
    pub fn visible_regions(&self) -> HashSet<Region> {
        let mut regions = self.accessible_regions.clone();
        if let Some(home) = &self.region {
            regions.insert(home.clone());
        }
        regions
    }

    /// Whether the account is allowed to authenticate.
    pub fn can_login(&self) -> bool {
        self.status == UserStatus::Active
    }
}
