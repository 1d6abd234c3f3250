//! Resource visibility scope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who may see a resource.
///
/// An unrecognized wire value deserializes to [`VisibilityScope::Unknown`],
/// which the scope evaluator treats as visible to nobody. A scope the
/// system does not understand must never widen access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityScope {
    /// Visible to every authenticated principal.
    Public,
    /// Visible to principals whose regions intersect the resource's.
    RegionBased,
    /// Visible only to explicitly allowed users or roles.
    Restricted,
    /// Unrecognized scope value; fails closed.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for VisibilityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::RegionBased => write!(f, "region_based"),
            Self::Restricted => write!(f, "restricted"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
