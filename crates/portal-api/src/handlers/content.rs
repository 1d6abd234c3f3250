//! Content handlers — CRUD, lifecycle, and enrollment over portal
//! content, generic across kinds.

use std::collections::HashSet;
use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use portal_core::Region;
use portal_core::error::AppError;
use portal_entity::resource::ResourceKind;
use portal_service::resource::{CreateResourceInput, UpdateResourceInput};

use crate::dto::request::{CreateContentRequest, UpdateContentRequest};
use crate::dto::response::{ApiResponse, ContentResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::middleware::guard::{COMPANY_ADMIN_ROLES, GuardPolicy};
use crate::state::AppState;

/// GET /api/content/{kind}
pub async fn list(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<Vec<ContentResponse>>>, ApiError> {
    let kind = ResourceKind::from_str(&kind)?;

    let items = state
        .resource_service
        .list(&principal, kind)
        .await
        .into_iter()
        .map(|resource| ContentResponse::for_user(resource, principal.id))
        .collect();

    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/content/{kind}
///
/// Authoring is company-admin-or-above with a region affiliation; the
/// policy check runs before any input parsing.
pub async fn create(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path(kind): Path<String>,
    Json(req): Json<CreateContentRequest>,
) -> Result<Json<ApiResponse<ContentResponse>>, ApiError> {
    GuardPolicy::roles(COMPANY_ADMIN_ROLES)
        .with_region()
        .allows(&principal)?;

    let kind = ResourceKind::from_str(&kind)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let resource = state
        .resource_service
        .create(
            &principal,
            CreateResourceInput {
                kind,
                title: req.title,
                visibility_scope: req.visibility_scope,
                visibility_regions: parse_regions(&req.visibility_regions)?,
                allowed_roles: req.allowed_roles,
                allowed_users: req.allowed_users,
                payload: req.payload,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(ContentResponse::for_user(
        resource,
        principal.id,
    ))))
}

/// GET /api/content/{kind}/{id}
pub async fn get_one(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<ContentResponse>>, ApiError> {
    let kind = ResourceKind::from_str(&kind)?;
    ensure_kind(&state, id, kind)?;

    let resource = state.resource_service.get(&principal, id).await?;

    Ok(Json(ApiResponse::ok(ContentResponse::for_user(
        resource,
        principal.id,
    ))))
}

/// PUT /api/content/{kind}/{id}
pub async fn update(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path((kind, id)): Path<(String, Uuid)>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<Json<ApiResponse<ContentResponse>>, ApiError> {
    let kind = ResourceKind::from_str(&kind)?;
    ensure_kind(&state, id, kind)?;

    let visibility_regions = match &req.visibility_regions {
        Some(regions) => Some(parse_regions(regions)?),
        None => None,
    };

    let resource = state
        .resource_service
        .update(
            &principal,
            id,
            UpdateResourceInput {
                title: req.title,
                visibility_regions,
                allowed_roles: req.allowed_roles,
                allowed_users: req.allowed_users,
                payload: req.payload,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(ContentResponse::for_user(
        resource,
        principal.id,
    ))))
}

/// DELETE /api/content/{kind}/{id}
pub async fn delete(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let kind = ResourceKind::from_str(&kind)?;
    ensure_kind(&state, id, kind)?;

    state.resource_service.delete(&principal, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Content deleted".to_string(),
    })))
}

/// POST /api/content/{kind}/{id}/publish
pub async fn publish(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<ContentResponse>>, ApiError> {
    let kind = ResourceKind::from_str(&kind)?;
    ensure_kind(&state, id, kind)?;

    let resource = state.resource_service.publish(&principal, id).await?;

    Ok(Json(ApiResponse::ok(ContentResponse::for_user(
        resource,
        principal.id,
    ))))
}

/// POST /api/content/{kind}/{id}/close
pub async fn close(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<ContentResponse>>, ApiError> {
    let kind = ResourceKind::from_str(&kind)?;
    ensure_kind(&state, id, kind)?;

    let resource = state.resource_service.close(&principal, id).await?;

    Ok(Json(ApiResponse::ok(ContentResponse::for_user(
        resource,
        principal.id,
    ))))
}

/// POST /api/content/{kind}/{id}/enrollment
pub async fn enroll(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<ContentResponse>>, ApiError> {
    let kind = ResourceKind::from_str(&kind)?;
    ensure_kind(&state, id, kind)?;

    let resource = state.enrollment_service.enroll(&principal, id).await?;

    Ok(Json(ApiResponse::ok(ContentResponse::for_user(
        resource,
        principal.id,
    ))))
}

/// DELETE /api/content/{kind}/{id}/enrollment
pub async fn cancel_enrollment(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<ContentResponse>>, ApiError> {
    let kind = ResourceKind::from_str(&kind)?;
    ensure_kind(&state, id, kind)?;

    let resource = state.enrollment_service.cancel(&principal, id).await?;

    Ok(Json(ApiResponse::ok(ContentResponse::for_user(
        resource,
        principal.id,
    ))))
}

/// A resource reached through the wrong kind segment is treated as
/// absent, so `/classes/{id}` never serves an announcement.
fn ensure_kind(state: &AppState, id: Uuid, kind: ResourceKind) -> Result<(), ApiError> {
    match state.resource_store.get(id) {
        Some(resource) if resource.kind != kind => {
            Err(AppError::not_found("Content not found").into())
        }
        _ => Ok(()),
    }
}

/// Parses region codes from request input.
fn parse_regions(codes: &[String]) -> Result<HashSet<Region>, AppError> {
    codes.iter().map(|code| code.parse()).collect()
}
