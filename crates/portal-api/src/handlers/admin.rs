//! Admin handlers — user provisioning and session oversight.

use std::collections::HashSet;

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use portal_core::Region;
use portal_core::error::AppError;
use portal_entity::user::{User, UserStatus};

use crate::dto::request::{CreateUserRequest, RevokeSessionsRequest};
use crate::dto::response::{ApiResponse, RevokedResponse, SessionResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::state::AppState;

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let region: Option<Region> = match &req.region {
        Some(code) => Some(code.parse()?),
        None => None,
    };
    let accessible_regions: HashSet<Region> = req
        .accessible_regions
        .iter()
        .map(|code| code.parse())
        .collect::<Result<_, _>>()?;

    let password_hash = state.password_hasher.hash_password(&req.password)?;

    let user = state.users.insert(User {
        id: Uuid::new_v4(),
        email: req.email,
        display_name: req.display_name,
        password_hash,
        role: req.role,
        region,
        accessible_regions,
        email_verified: req.email_verified,
        totp_enabled: false,
        status: UserStatus::Active,
        created_at: Utc::now(),
        last_login_at: None,
    })?;

    info!(
        user_id = %user.id,
        role = %user.role,
        created_by = %principal.id,
        "User account created"
    );

    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _principal: AuthPrincipal,
) -> Json<ApiResponse<Vec<UserResponse>>> {
    let users = state
        .users
        .list()
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Json(ApiResponse::ok(users))
}

/// GET /api/admin/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    _principal: AuthPrincipal,
) -> Json<ApiResponse<Vec<SessionResponse>>> {
    let sessions = state
        .session_store
        .list_active()
        .await
        .into_iter()
        .map(SessionResponse::from)
        .collect();

    Json(ApiResponse::ok(sessions))
}

/// POST /api/admin/users/{id}/revoke-sessions
///
/// "Logout everywhere" for a user: any in-flight request holding one of
/// these sessions fails on its next principal resolution.
pub async fn revoke_user_sessions(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path(user_id): Path<Uuid>,
    Json(req): Json<RevokeSessionsRequest>,
) -> Result<Json<ApiResponse<RevokedResponse>>, ApiError> {
    let revoked = state
        .session_manager
        .revoke_all_user_sessions(user_id, principal.id, &req.reason)
        .await?;

    Ok(Json(ApiResponse::ok(RevokedResponse { revoked })))
}
