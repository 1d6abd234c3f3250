//! Enrollment service — roster mutations gated by the engine.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use portal_auth::policy::PolicyEngine;
use portal_auth::principal::Principal;
use portal_core::error::AppError;
use portal_entity::resource::Resource;

use super::service::denial_to_error;
use super::store::ResourceStore;

/// Enroll/withdraw operations for enrollment-bearing content.
///
/// Both operations re-run the engine inside the store's entry lock, so
/// the check and the roster mutation are one atomic step: two racing
/// enrolls for the same student cannot both succeed.
#[derive(Clone)]
pub struct EnrollmentService {
    /// Content storage.
    store: Arc<ResourceStore>,
    /// The decision surface.
    engine: PolicyEngine,
}

impl std::fmt::Debug for EnrollmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrollmentService").finish()
    }
}

impl EnrollmentService {
    /// Creates a new enrollment service.
    pub fn new(store: Arc<ResourceStore>, engine: PolicyEngine) -> Self {
        Self { store, engine }
    }

    /// Enrolls the principal in the resource.
    pub async fn enroll(&self, principal: &Principal, id: Uuid) -> Result<Resource, AppError> {
        self.visible_enrollable(principal, id)?;

        let engine = self.engine.clone();
        let updated = self.store.mutate(id, |resource| {
            let decision = engine.can_enroll(principal, resource);
            if !decision.is_allowed() {
                return Err(denial_to_error(resource, decision.reason));
            }
            resource.enrolled_users.insert(principal.id);
            resource.updated_at = Utc::now();
            Ok(())
        })?;

        info!(
            resource_id = %id,
            user_id = %principal.id,
            "Enrollment completed"
        );

        Ok(updated)
    }

    /// Withdraws the principal's enrollment.
    pub async fn cancel(&self, principal: &Principal, id: Uuid) -> Result<Resource, AppError> {
        self.visible_enrollable(principal, id)?;

        let engine = self.engine.clone();
        let updated = self.store.mutate(id, |resource| {
            let decision = engine.can_cancel_enrollment(principal, resource);
            if !decision.is_allowed() {
                return Err(denial_to_error(resource, decision.reason));
            }
            resource.enrolled_users.remove(&principal.id);
            resource.updated_at = Utc::now();
            Ok(())
        })?;

        info!(
            resource_id = %id,
            user_id = %principal.id,
            "Enrollment cancelled"
        );

        Ok(updated)
    }

    /// Pre-checks shared by both operations: the resource must exist,
    /// be visible to the principal, and be of an enrollment-bearing kind.
    fn visible_enrollable(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        let resource = self
            .store
            .get(id)
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        let decision = self.engine.can_access(principal, &resource);
        if !decision.is_allowed() {
            return Err(denial_to_error(&resource, decision.reason));
        }

        if !resource.kind.supports_enrollment() {
            return Err(AppError::validation(format!(
                "{} content does not support enrollment",
                resource.kind
            )));
        }

        Ok(())
    }
}
