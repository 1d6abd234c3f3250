//! Per-action authorization checks.
//!
//! Every method is a pure function of `(principal, resource)` — no I/O,
//! no locks, safe to call from any number of concurrent request tasks.
//! Grants are additive: a rule may only ever widen what another rule
//! grants, never revoke it, so an owner who is also a company admin
//! gets the union of both.

use portal_entity::resource::{LifecycleState, Resource, VisibilityScope};
use portal_entity::user::Role;

use crate::principal::Principal;
use crate::scope;

use super::decision::{Decision, DenialReason};

/// The portal's decision surface, one method per action.
#[derive(Debug, Clone, Default)]
pub struct PolicyEngine;

impl PolicyEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// May the principal see this resource?
    ///
    /// Admins see everything. Owners see their own resources regardless
    /// of scope or state — ownership overrides a region mismatch and
    /// draft hiding. Everyone else needs the resource out of draft and
    /// their shape admitted by the visibility scope.
    pub fn can_access(&self, principal: &Principal, resource: &Resource) -> Decision {
        if principal.role.is_admin() {
            return Decision::allow();
        }
        if resource.is_owned_by(principal.id) {
            return Decision::allow();
        }
        if resource.lifecycle_state == LifecycleState::Draft {
            return Decision::deny(DenialReason::NotVisible);
        }
        if scope::visible(principal, resource) {
            Decision::allow()
        } else {
            Decision::deny(DenialReason::NotVisible)
        }
    }

    /// May the principal edit this resource?
    ///
    /// Admins and owners may. A company admin may edit any non-public
    /// resource: broader visibility requires higher privilege to mutate,
    /// so public-scope resources stay admin/owner-only.
    pub fn can_edit(&self, principal: &Principal, resource: &Resource) -> Decision {
        if principal.role.is_admin() {
            return Decision::allow();
        }
        if resource.is_owned_by(principal.id) {
            return Decision::allow();
        }
        if principal.role == Role::CompanyAdmin
            && resource.visibility_scope != VisibilityScope::Public
        {
            return Decision::allow();
        }
        Decision::deny(DenialReason::InsufficientRole)
    }

    /// May the principal delete this resource?
    ///
    /// Stricter than edit: company_admin alone is not enough to delete
    /// another's resource.
    pub fn can_delete(&self, principal: &Principal, resource: &Resource) -> Decision {
        if principal.role.is_admin() || resource.is_owned_by(principal.id) {
            return Decision::allow();
        }
        Decision::deny(DenialReason::InsufficientRole)
    }

    /// May the principal publish (or close) this resource?
    ///
    /// Never delegated: ownership does not grant publishing.
    pub fn can_publish(&self, principal: &Principal, _resource: &Resource) -> Decision {
        if principal.role.is_admin() {
            return Decision::allow();
        }
        Decision::deny(DenialReason::InsufficientRole)
    }

    /// May the principal enroll in this resource?
    ///
    /// Students only, published resources only, and never twice: a
    /// second enroll attempt is rejected, not silently accepted.
    pub fn can_enroll(&self, principal: &Principal, resource: &Resource) -> Decision {
        if principal.role != Role::Student {
            return Decision::deny(DenialReason::InsufficientRole);
        }
        if resource.lifecycle_state != LifecycleState::Published {
            return Decision::deny(DenialReason::InvalidState);
        }
        if resource.is_enrolled(principal.id) {
            return Decision::deny(DenialReason::AlreadyEnrolled);
        }
        Decision::allow()
    }

    /// May the principal withdraw their enrollment?
    ///
    /// Legal in `Published` and `Closed` — a student may withdraw even
    /// after closing — but not in `Draft`, where there is nothing to
    /// withdraw from.
    pub fn can_cancel_enrollment(&self, principal: &Principal, resource: &Resource) -> Decision {
        if principal.role != Role::Student {
            return Decision::deny(DenialReason::InsufficientRole);
        }
        if resource.lifecycle_state == LifecycleState::Draft {
            return Decision::deny(DenialReason::InvalidState);
        }
        if !resource.is_enrolled(principal.id) {
            return Decision::deny(DenialReason::NotEnrolled);
        }
        Decision::allow()
    }
}
