//! Request guard — the coarse role/region gate in front of handlers.
//!
//! The guard resolves the principal, enforces a role allow-list and an
//! optional region requirement, and injects the resolved [`Principal`]
//! into the request extensions for handlers and the `AuthPrincipal`
//! extractor. It rejects before business logic runs; the fine-grained,
//! per-resource gate stays with the policy engine inside the services.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use portal_auth::principal::Principal;
use portal_core::error::AppError;
use portal_entity::user::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// The globally privileged roles.
pub const ADMIN_ROLES: &[Role] = &[Role::Owner, Role::Secretariat];
/// Roles that may author content.
pub const COMPANY_ADMIN_ROLES: &[Role] = &[Role::Owner, Role::Secretariat, Role::CompanyAdmin];
/// Roles that may enroll.
pub const STUDENT_ROLES: &[Role] = &[Role::Student];

/// What a guarded route requires of its principal.
#[derive(Debug, Clone, Copy)]
pub struct GuardPolicy {
    /// Allowed roles; empty means any authenticated principal.
    pub required_roles: &'static [Role],
    /// Whether the principal must be region-affiliated.
    pub require_region: bool,
}

impl GuardPolicy {
    /// Any authenticated principal.
    pub const fn authenticated() -> Self {
        Self {
            required_roles: &[],
            require_region: false,
        }
    }

    /// Only the given roles.
    pub const fn roles(required_roles: &'static [Role]) -> Self {
        Self {
            required_roles,
            require_region: false,
        }
    }

    /// Additionally require a region-affiliated principal.
    pub const fn with_region(mut self) -> Self {
        self.require_region = true;
        self
    }

    /// Checks the policy against a resolved principal.
    pub fn allows(&self, principal: &Principal) -> Result<(), AppError> {
        if !self.required_roles.is_empty() && !self.required_roles.contains(&principal.role) {
            return Err(AppError::insufficient_role(format!(
                "Role '{}' may not perform this action",
                principal.role
            )));
        }
        if self.require_region && principal.region.is_none() {
            return Err(AppError::insufficient_role(
                "A region-affiliated account is required for this action",
            ));
        }
        Ok(())
    }
}

/// Requires any authenticated principal.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    enforce(GuardPolicy::authenticated(), state, req, next).await
}

/// Requires an owner or secretariat principal.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    enforce(GuardPolicy::roles(ADMIN_ROLES), state, req, next).await
}

/// Requires a company admin or higher, with a region affiliation.
pub async fn require_company_admin_region(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    enforce(
        GuardPolicy::roles(COMPANY_ADMIN_ROLES).with_region(),
        state,
        req,
        next,
    )
    .await
}

/// Requires a student principal.
pub async fn require_student(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    enforce(GuardPolicy::roles(STUDENT_ROLES), state, req, next).await
}

/// Resolves the principal, applies the policy, and caches the principal
/// in the request extensions on success.
async fn enforce(
    policy: GuardPolicy,
    state: AppState,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let principal = state.principal_resolver.resolve_bearer(header).await?;
    policy.allows(&principal)?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
