//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use portal_auth::jwt::{JwtDecoder, JwtEncoder};
use portal_auth::password::PasswordHasher;
use portal_auth::policy::PolicyEngine;
use portal_auth::principal::PrincipalResolver;
use portal_auth::session::{SessionManager, SessionStore};
use portal_core::config::AppConfig;
use portal_service::resource::{EnrollmentService, ResourceService, ResourceStore};
use portal_service::user::UserDirectory;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2id)
    pub password_hasher: Arc<PasswordHasher>,
    /// Session lifecycle state
    pub session_store: Arc<SessionStore>,
    /// Session lifecycle flows (login/logout/refresh)
    pub session_manager: Arc<SessionManager>,
    /// Bearer credential → principal resolution
    pub principal_resolver: Arc<PrincipalResolver>,
    /// The authorization decision surface
    pub policy_engine: PolicyEngine,

    // ── Directories & services ───────────────────────────────
    /// User directory
    pub users: Arc<UserDirectory>,
    /// Content storage
    pub resource_store: Arc<ResourceStore>,
    /// Content CRUD and lifecycle service
    pub resource_service: Arc<ResourceService>,
    /// Enrollment service
    pub enrollment_service: Arc<EnrollmentService>,
}
