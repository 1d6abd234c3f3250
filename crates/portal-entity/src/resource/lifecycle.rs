//! Resource lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow stage of a resource: `draft -> published -> closed`.
///
/// Enrollment is legal only in `Published`; withdrawal is legal in
/// `Published` and `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Not yet visible to non-owners.
    Draft,
    /// Live; enrollable where the kind supports it.
    Published,
    /// No longer accepting enrollment; still viewable.
    Closed,
}

impl LifecycleState {
    /// Whether the state machine permits moving to `next`.
    pub fn can_transition_to(&self, next: LifecycleState) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Published) | (Self::Published, Self::Closed)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Closed => write!(f, "closed"),
        }
    }
}
