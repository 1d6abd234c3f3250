//! Portal content resources.
//!
//! Classes, committees, projects, and announcements all share one tagged
//! [`Resource`] shape; entity-specific data lives in the `payload` field
//! so the authorization core only ever sees the shared fields.

pub mod kind;
pub mod lifecycle;
pub mod model;
pub mod scope;

pub use kind::ResourceKind;
pub use lifecycle::LifecycleState;
pub use model::Resource;
pub use scope::VisibilityScope;
