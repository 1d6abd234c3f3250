//! Content service — CRUD and lifecycle operations gated by the engine.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use portal_auth::policy::{DenialReason, PolicyEngine};
use portal_auth::principal::Principal;
use portal_core::Region;
use portal_core::error::AppError;
use portal_entity::resource::{LifecycleState, Resource, ResourceKind, VisibilityScope};
use portal_entity::user::Role;

use super::store::ResourceStore;

/// Input for creating a resource.
#[derive(Debug, Clone)]
pub struct CreateResourceInput {
    /// What kind of content to create.
    pub kind: ResourceKind,
    /// Title shown in listings.
    pub title: String,
    /// Who may see the resource.
    pub visibility_scope: VisibilityScope,
    /// Regions for region-based visibility.
    pub visibility_regions: HashSet<Region>,
    /// Role allow-list for restricted visibility.
    pub allowed_roles: HashSet<Role>,
    /// User allow-list for restricted visibility.
    pub allowed_users: HashSet<Uuid>,
    /// Entity-specific data.
    pub payload: serde_json::Value,
}

/// Input for updating a resource. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateResourceInput {
    /// New title.
    pub title: Option<String>,
    /// New region set for region-based visibility.
    pub visibility_regions: Option<HashSet<Region>>,
    /// New role allow-list.
    pub allowed_roles: Option<HashSet<Role>>,
    /// New user allow-list.
    pub allowed_users: Option<HashSet<Uuid>>,
    /// New entity-specific data.
    pub payload: Option<serde_json::Value>,
}

/// CRUD and lifecycle operations over portal content.
///
/// The route guard has already done the coarse role gate by the time a
/// call lands here; this service does the fine-grained, per-resource
/// gate through the policy engine.
#[derive(Clone)]
pub struct ResourceService {
    /// Content storage.
    store: Arc<ResourceStore>,
    /// The decision surface.
    engine: PolicyEngine,
}

impl std::fmt::Debug for ResourceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService").finish()
    }
}

impl ResourceService {
    /// Creates a new resource service.
    pub fn new(store: Arc<ResourceStore>, engine: PolicyEngine) -> Self {
        Self { store, engine }
    }

    /// Creates a resource owned by the principal, in `Draft` state.
    ///
    /// Region-based visibility always includes the creator's region, and
    /// a region-less principal cannot create region-scoped content.
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateResourceInput,
    ) -> Result<Resource, AppError> {
        if input.title.trim().is_empty() {
            return Err(AppError::validation("Title must not be empty"));
        }

        let mut visibility_regions = input.visibility_regions;
        match input.visibility_scope {
            VisibilityScope::RegionBased => {
                let home = principal.region.clone().ok_or_else(|| {
                    AppError::validation(
                        "Region-scoped content requires a region-affiliated creator",
                    )
                })?;
                visibility_regions.insert(home);
            }
            VisibilityScope::Unknown => {
                return Err(AppError::validation("Unknown visibility scope"));
            }
            VisibilityScope::Public | VisibilityScope::Restricted => {}
        }

        let now = Utc::now();
        let resource = Resource {
            id: Uuid::new_v4(),
            kind: input.kind,
            title: input.title,
            owner_id: principal.id,
            visibility_scope: input.visibility_scope,
            visibility_regions,
            allowed_roles: input.allowed_roles,
            allowed_users: input.allowed_users,
            lifecycle_state: LifecycleState::Draft,
            enrolled_users: HashSet::new(),
            payload: input.payload,
            created_at: now,
            updated_at: now,
            published_at: None,
        };

        self.store.insert(resource.clone());

        info!(
            resource_id = %resource.id,
            kind = %resource.kind,
            owner_id = %principal.id,
            scope = %resource.visibility_scope,
            "Content created"
        );

        Ok(resource)
    }

    /// Fetches a resource the principal may access.
    pub async fn get(&self, principal: &Principal, id: Uuid) -> Result<Resource, AppError> {
        let resource = self
            .store
            .get(id)
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        self.require_access(principal, &resource)?;
        Ok(resource)
    }

    /// Lists resources of a kind, filtered to what the principal may see.
    pub async fn list(&self, principal: &Principal, kind: ResourceKind) -> Vec<Resource> {
        self.store
            .list_by_kind(kind)
            .into_iter()
            .filter(|resource| self.engine.can_access(principal, resource).is_allowed())
            .collect()
    }

    /// Applies an update to a resource the principal may edit.
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        input: UpdateResourceInput,
    ) -> Result<Resource, AppError> {
        let resource = self
            .store
            .get(id)
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        self.require_access(principal, &resource)?;

        let decision = self.engine.can_edit(principal, &resource);
        if !decision.is_allowed() {
            warn!(
                resource_id = %id,
                user_id = %principal.id,
                "Edit denied"
            );
            return Err(self.denial_to_error(&resource, decision.reason));
        }

        self.store.mutate(id, |resource| {
            if let Some(title) = input.title {
                if title.trim().is_empty() {
                    return Err(AppError::validation("Title must not be empty"));
                }
                resource.title = title;
            }
            if let Some(regions) = input.visibility_regions {
                if resource.visibility_scope == VisibilityScope::RegionBased && regions.is_empty() {
                    return Err(AppError::validation(
                        "Region-scoped content must keep at least one region",
                    ));
                }
                resource.visibility_regions = regions;
            }
            if let Some(roles) = input.allowed_roles {
                resource.allowed_roles = roles;
            }
            if let Some(users) = input.allowed_users {
                resource.allowed_users = users;
            }
            if let Some(payload) = input.payload {
                resource.payload = payload;
            }
            resource.updated_at = Utc::now();
            Ok(())
        })
    }

    /// Deletes a resource the principal may delete.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        let resource = self
            .store
            .get(id)
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        self.require_access(principal, &resource)?;

        let decision = self.engine.can_delete(principal, &resource);
        if !decision.is_allowed() {
            return Err(self.denial_to_error(&resource, decision.reason));
        }

        self.store.remove(id);

        info!(
            resource_id = %id,
            user_id = %principal.id,
            "Content deleted"
        );

        Ok(())
    }

    /// Publishes a draft resource. Admin-only, `draft -> published`.
    pub async fn publish(&self, principal: &Principal, id: Uuid) -> Result<Resource, AppError> {
        self.transition(principal, id, LifecycleState::Published)
    }

    /// Closes a published resource. Admin-only, `published -> closed`.
    pub async fn close(&self, principal: &Principal, id: Uuid) -> Result<Resource, AppError> {
        self.transition(principal, id, LifecycleState::Closed)
    }

    /// Runs an admin-gated lifecycle transition.
    fn transition(
        &self,
        principal: &Principal,
        id: Uuid,
        next: LifecycleState,
    ) -> Result<Resource, AppError> {
        let resource = self
            .store
            .get(id)
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        let decision = self.engine.can_publish(principal, &resource);
        if !decision.is_allowed() {
            return Err(self.denial_to_error(&resource, decision.reason));
        }

        let updated = self.store.mutate(id, |resource| {
            if !resource.lifecycle_state.can_transition_to(next) {
                return Err(AppError::invalid_state(format!(
                    "Cannot move {} content to {next}",
                    resource.lifecycle_state
                )));
            }
            resource.lifecycle_state = next;
            resource.updated_at = Utc::now();
            if next == LifecycleState::Published {
                resource.published_at = Some(Utc::now());
            }
            Ok(())
        })?;

        info!(
            resource_id = %id,
            user_id = %principal.id,
            state = %next,
            "Content lifecycle transition"
        );

        Ok(updated)
    }

    /// Enforces `can_access`, translating a denial per the
    /// existence-hiding policy.
    pub(crate) fn require_access(
        &self,
        principal: &Principal,
        resource: &Resource,
    ) -> Result<(), AppError> {
        let decision = self.engine.can_access(principal, resource);
        if decision.is_allowed() {
            return Ok(());
        }
        // The client response may hide the resource; the log keeps the
        // real reason for operators.
        tracing::debug!(
            resource_id = %resource.id,
            user_id = %principal.id,
            reason = ?decision.reason,
            "Access denied"
        );
        Err(self.denial_to_error(resource, decision.reason))
    }

    /// Maps an engine denial to the error the caller should surface.
    pub(crate) fn denial_to_error(
        &self,
        resource: &Resource,
        reason: Option<DenialReason>,
    ) -> AppError {
        denial_to_error(resource, reason)
    }
}

/// Maps an engine denial to the error the caller should surface.
///
/// Denied access to a restricted resource is reported as not-found,
/// uniformly: the response must not confirm the resource exists.
/// Admins are never in this path (the engine always admits them).
pub(crate) fn denial_to_error(resource: &Resource, reason: Option<DenialReason>) -> AppError {
    match reason {
        Some(DenialReason::NotVisible)
            if resource.visibility_scope == VisibilityScope::Restricted =>
        {
            AppError::not_found("Content not found")
        }
        Some(DenialReason::NotVisible) => {
            AppError::resource_forbidden("You may not view this content")
        }
        Some(DenialReason::InsufficientRole) => {
            AppError::resource_forbidden("You may not modify this content")
        }
        Some(DenialReason::InvalidState) => {
            AppError::invalid_state("The content's state does not allow this action")
        }
        Some(DenialReason::AlreadyEnrolled) => AppError::already_enrolled("Already enrolled"),
        Some(DenialReason::NotEnrolled) => AppError::conflict("Not enrolled"),
        None => AppError::resource_forbidden("Forbidden"),
    }
}
