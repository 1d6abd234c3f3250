//! Request DTOs with validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use portal_entity::resource::VisibilityScope;
use portal_entity::user::Role;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Admin request to create a user account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
    /// Role to grant.
    pub role: Role,
    /// Home region code, if region-affiliated.
    pub region: Option<String>,
    /// Additional accessible region codes.
    #[serde(default)]
    pub accessible_regions: Vec<String>,
    /// Whether the email is pre-verified.
    #[serde(default)]
    pub email_verified: bool,
}

/// Request to create portal content.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContentRequest {
    /// Title shown in listings.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Who may see the content. Unrecognized values fail closed and
    /// are rejected at creation.
    pub visibility_scope: VisibilityScope,
    /// Region codes for region-based visibility.
    #[serde(default)]
    pub visibility_regions: Vec<String>,
    /// Role allow-list for restricted visibility.
    #[serde(default)]
    pub allowed_roles: HashSet<Role>,
    /// User allow-list for restricted visibility.
    #[serde(default)]
    pub allowed_users: HashSet<Uuid>,
    /// Entity-specific data.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Request to update portal content. Omitted fields are unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateContentRequest {
    /// New title.
    pub title: Option<String>,
    /// New region codes for region-based visibility.
    pub visibility_regions: Option<Vec<String>>,
    /// New role allow-list.
    pub allowed_roles: Option<HashSet<Role>>,
    /// New user allow-list.
    pub allowed_users: Option<HashSet<Uuid>>,
    /// New entity-specific data.
    pub payload: Option<serde_json::Value>,
}

/// Admin request to revoke all of a user's sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeSessionsRequest {
    /// Reason recorded on the revoked sessions.
    #[serde(default = "default_revoke_reason")]
    pub reason: String,
}

fn default_revoke_reason() -> String {
    "Revoked by administrator".to_string()
}
