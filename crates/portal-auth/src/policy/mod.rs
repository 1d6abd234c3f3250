//! The per-action authorization engine.

pub mod decision;
pub mod engine;

pub use decision::{Decision, DenialReason};
pub use engine::PolicyEngine;
