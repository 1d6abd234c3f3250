//! Raw visibility evaluation, independent of role.
//!
//! This module answers exactly one question: does the resource's own
//! visibility configuration admit this principal? Admin bypass and
//! ownership overrides are the policy engine's business — keeping them
//! out of here means scope rules can be audited against the resource
//! shape alone.

use portal_entity::resource::{Resource, VisibilityScope};

use crate::principal::Principal;

/// Whether the resource's visibility configuration admits the principal.
///
/// - `Public`: always visible.
/// - `RegionBased`: visible when the resource's regions intersect the
///   principal's accessible regions, or contain the principal's home
///   region.
/// - `Restricted`: visible when the principal is on the user allow-list
///   or their role is on the role allow-list.
/// - `Unknown`: never visible. A scope the system does not understand
///   must fail closed.
pub fn visible(principal: &Principal, resource: &Resource) -> bool {
    match resource.visibility_scope {
        VisibilityScope::Public => true,
        VisibilityScope::RegionBased => {
            let intersects = resource
                .visibility_regions
                .iter()
                .any(|region| principal.accessible_regions.contains(region));
            let home_match = principal
                .region
                .as_ref()
                .map(|region| resource.visibility_regions.contains(region))
                .unwrap_or(false);
            intersects || home_match
        }
        VisibilityScope::Restricted => {
            resource.allowed_users.contains(&principal.id)
                || resource.allowed_roles.contains(&principal.role)
        }
        VisibilityScope::Unknown => false,
    }
}
