//! Authorization decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an action was denied.
///
/// Transport-agnostic: the engine never picks an HTTP status. Callers
/// map reasons to responses, which also lets them hide restricted
/// resources behind a not-found instead of confirming their existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The principal's role does not grant this action.
    InsufficientRole,
    /// The resource's visibility configuration does not admit the
    /// principal (or the resource is an unpublished draft).
    NotVisible,
    /// The action is illegal for the resource's lifecycle state.
    InvalidState,
    /// The principal is already enrolled.
    AlreadyEnrolled,
    /// The principal is not enrolled, so there is nothing to withdraw.
    NotEnrolled,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientRole => write!(f, "insufficient_role"),
            Self::NotVisible => write!(f, "not_visible"),
            Self::InvalidState => write!(f, "invalid_state"),
            Self::AlreadyEnrolled => write!(f, "already_enrolled"),
            Self::NotEnrolled => write!(f, "not_enrolled"),
        }
    }
}

/// The engine's output: allowed, or denied with a reason.
///
/// Computed fresh per call — decisions are never cached, since role and
/// resource state can change between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the action is permitted.
    pub allowed: bool,
    /// Why not, when it is not.
    pub reason: Option<DenialReason>,
}

impl Decision {
    /// An allowing decision.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A denying decision with the given reason.
    pub fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Whether the action is permitted.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}
