//! Application builder — wires state + router into a runnable server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::Utc;
use uuid::Uuid;

use portal_auth::directory::UserStore;
use portal_auth::jwt::{JwtDecoder, JwtEncoder};
use portal_auth::password::PasswordHasher;
use portal_auth::policy::PolicyEngine;
use portal_auth::principal::PrincipalResolver;
use portal_auth::session::{MemorySessionBackend, SessionCleanup, SessionManager, SessionStore};
use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_entity::user::{Role, User, UserStatus};
use portal_service::resource::{EnrollmentService, ResourceService, ResourceStore};
use portal_service::user::UserDirectory;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Wires all components into an [`AppState`], seeding the bootstrap
/// owner account when the directory is empty.
pub fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let config = Arc::new(config);

    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let password_hasher = Arc::new(PasswordHasher::new());

    let session_store = Arc::new(SessionStore::new(
        Arc::new(MemorySessionBackend::new()),
        &config.auth,
    ));

    let users = Arc::new(UserDirectory::new());
    seed_bootstrap_owner(&config, &users, &password_hasher)?;

    let user_store: Arc<dyn UserStore> = users.clone();
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        Arc::clone(&session_store),
        user_store,
        Arc::clone(&password_hasher),
    ));

    let principal_resolver = Arc::new(PrincipalResolver::new(
        Arc::clone(&jwt_decoder),
        Arc::clone(&session_store),
    ));

    let policy_engine = PolicyEngine::new();

    let resource_store = Arc::new(ResourceStore::new());
    let resource_service = Arc::new(ResourceService::new(
        Arc::clone(&resource_store),
        policy_engine.clone(),
    ));
    let enrollment_service = Arc::new(EnrollmentService::new(
        Arc::clone(&resource_store),
        policy_engine.clone(),
    ));

    Ok(AppState {
        config,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        session_store,
        session_manager,
        principal_resolver,
        policy_engine,
        users,
        resource_store,
        resource_service,
        enrollment_service,
    })
}

/// Runs the portal server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let cleanup_interval = config.session.cleanup_interval_minutes;

    let state = build_state(config)?;

    spawn_session_cleanup(Arc::clone(&state.session_store), cleanup_interval);

    let app = build_app(state);

    tracing::info!(addr = %bind_addr, "Portal server listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_addr}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

/// Spawns the periodic session cleanup task.
fn spawn_session_cleanup(session_store: Arc<SessionStore>, interval_minutes: u64) {
    let cleanup = SessionCleanup::new(session_store);

    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(interval_minutes.max(1) * 60));
        // The first tick fires immediately; skip it.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = cleanup.run_cleanup().await {
                tracing::error!(error = %e, "Session cleanup failed");
            }
        }
    });
}

/// Creates the bootstrap owner account when the directory is empty, so
/// a fresh deployment is administrable.
fn seed_bootstrap_owner(
    config: &AppConfig,
    users: &UserDirectory,
    hasher: &PasswordHasher,
) -> Result<(), AppError> {
    if !users.is_empty() {
        return Ok(());
    }

    let bootstrap = &config.auth.bootstrap;
    let password_hash = hasher.hash_password(&bootstrap.password)?;

    let owner = users.insert(User {
        id: Uuid::new_v4(),
        email: bootstrap.email.clone(),
        display_name: bootstrap.display_name.clone(),
        password_hash,
        role: Role::Owner,
        region: Some(bootstrap.region.parse()?),
        accessible_regions: Default::default(),
        email_verified: true,
        totp_enabled: false,
        status: UserStatus::Active,
        created_at: Utc::now(),
        last_login_at: None,
    })?;

    tracing::warn!(
        email = %owner.email,
        "Seeded bootstrap owner account; change its password"
    );

    Ok(())
}
