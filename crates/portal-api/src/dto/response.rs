//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_core::Region;
use portal_entity::resource::{LifecycleState, Resource, ResourceKind, VisibilityScope};
use portal_entity::session::Session;
use portal_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// User details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Role.
    pub role: String,
    /// Home region, if region-affiliated.
    pub region: Option<Region>,
    /// Accessible regions.
    pub accessible_regions: Vec<Region>,
    /// Whether the email is verified.
    pub email_verified: bool,
    /// Whether TOTP is enabled.
    pub totp_enabled: bool,
    /// Account status.
    pub status: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last login, if any.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role.to_string(),
            region: user.region,
            accessible_regions: user.accessible_regions.into_iter().collect(),
            email_verified: user.email_verified,
            totp_enabled: user.totp_enabled,
            status: user.status.to_string(),
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Login / refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: UserResponse,
}

/// Portal content details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Resource ID.
    pub id: Uuid,
    /// Content kind.
    pub kind: ResourceKind,
    /// Title.
    pub title: String,
    /// Owning user.
    pub owner_id: Uuid,
    /// Visibility scope.
    pub visibility_scope: VisibilityScope,
    /// Regions for region-based visibility.
    pub visibility_regions: Vec<Region>,
    /// Lifecycle state.
    pub lifecycle_state: LifecycleState,
    /// How many users are enrolled.
    pub enrolled_count: usize,
    /// Whether the requesting principal is enrolled.
    pub enrolled: bool,
    /// Entity-specific data.
    pub payload: serde_json::Value,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Publication time, if published.
    pub published_at: Option<DateTime<Utc>>,
}

impl ContentResponse {
    /// Builds a response for the given requesting user.
    pub fn for_user(resource: Resource, user_id: Uuid) -> Self {
        Self {
            id: resource.id,
            kind: resource.kind,
            title: resource.title,
            owner_id: resource.owner_id,
            visibility_scope: resource.visibility_scope,
            visibility_regions: resource.visibility_regions.into_iter().collect(),
            lifecycle_state: resource.lifecycle_state,
            enrolled_count: resource.enrolled_users.len(),
            enrolled: resource.enrolled_users.contains(&user_id),
            payload: resource.payload,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
            published_at: resource.published_at,
        }
    }
}

/// Session details for the admin view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session ID.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Access window close.
    pub expires_at: DateTime<Utc>,
    /// Refresh window close.
    pub refresh_expires_at: DateTime<Utc>,
    /// Whether the session is revoked.
    pub revoked: bool,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id,
            created_at: session.created_at,
            expires_at: session.expires_at,
            refresh_expires_at: session.refresh_expires_at,
            revoked: session.revoked,
        }
    }
}

/// Result of a revoke-all operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedResponse {
    /// How many sessions were revoked.
    pub revoked: u32,
}
