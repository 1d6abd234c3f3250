//! Route definitions for the portal HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Coarse
//! role gates are applied per route group via the guard middleware;
//! mixed-method paths whose methods need different gates enforce the
//! stricter policy at the top of the handler instead.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::guard;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(content_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, logout, refresh, me.
///
/// Login and refresh are anonymous; logout and me authenticate through
/// the `AuthPrincipal` extractor.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Content endpoints, generic across classes, committees, projects,
/// and announcements.
fn content_routes(state: AppState) -> Router<AppState> {
    // Lifecycle transitions are admin-only at the route level.
    let lifecycle = Router::new()
        .route(
            "/content/{kind}/{id}/publish",
            post(handlers::content::publish),
        )
        .route("/content/{kind}/{id}/close", post(handlers::content::close))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::require_admin,
        ));

    // Enrollment is student-only at the route level.
    let enrollment = Router::new()
        .route(
            "/content/{kind}/{id}/enrollment",
            post(handlers::content::enroll).delete(handlers::content::cancel_enrollment),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::require_student,
        ));

    // Browsing and editing require authentication; creation shares the
    // collection path with listing, so its company-admin+region policy
    // is enforced first thing in the handler.
    let general = Router::new()
        .route(
            "/content/{kind}",
            get(handlers::content::list).post(handlers::content::create),
        )
        .route(
            "/content/{kind}/{id}",
            get(handlers::content::get_one)
                .put(handlers::content::update)
                .delete(handlers::content::delete),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            guard::require_auth,
        ));

    Router::new()
        .merge(lifecycle)
        .merge(enrollment)
        .merge(general)
}

/// Admin endpoints: user provisioning and session oversight.
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .route("/admin/sessions", get(handlers::admin::list_sessions))
        .route(
            "/admin/users/{id}/revoke-sessions",
            post(handlers::admin::revoke_user_sessions),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            guard::require_admin,
        ))
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
