//! Resource entity model.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_core::Region;

use crate::user::Role;

use super::kind::ResourceKind;
use super::lifecycle::LifecycleState;
use super::scope::VisibilityScope;

/// A piece of portal content: class, committee, project, or announcement.
///
/// All kinds share this shape; the authorization engine reads only the
/// shared fields (`owner_id`, `visibility_scope`, region tags, allow-lists,
/// `lifecycle_state`). Entity-specific data — a class syllabus, a
/// committee charter — rides along in `payload` untouched by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: Uuid,
    /// What kind of content this is.
    pub kind: ResourceKind,
    /// Title shown in listings.
    pub title: String,
    /// The author / manager / chairperson who owns the resource.
    pub owner_id: Uuid,
    /// Who may see this resource.
    pub visibility_scope: VisibilityScope,
    /// Regions that may see the resource when the scope is region-based.
    ///
    /// Invariant: when `visibility_scope` is `RegionBased` this set is
    /// non-empty and includes the creating principal's region.
    pub visibility_regions: HashSet<Region>,
    /// Roles allowed to see the resource when the scope is restricted.
    pub allowed_roles: HashSet<Role>,
    /// Users allowed to see the resource when the scope is restricted.
    pub allowed_users: HashSet<Uuid>,
    /// Workflow stage.
    pub lifecycle_state: LifecycleState,
    /// Users currently enrolled (empty for kinds without enrollment).
    pub enrolled_users: HashSet<Uuid>,
    /// Entity-specific data the authorization core never inspects.
    #[serde(default)]
    pub payload: serde_json::Value,
    /// When the resource was created.
    pub created_at: DateTime<Utc>,
    /// When the resource was last modified.
    pub updated_at: DateTime<Utc>,
    /// When the resource was published, if it has been.
    pub published_at: Option<DateTime<Utc>>,
}

impl Resource {
    /// Whether the given user owns this resource.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Whether the given user is on the enrollment roster.
    pub fn is_enrolled(&self, user_id: Uuid) -> bool {
        self.enrolled_users.contains(&user_id)
    }
}
