//! # portal-entity
//!
//! Domain entities for Kizuna Portal.
//!
//! ## Modules
//!
//! - `user` — user accounts, the role hierarchy, account status
//! - `session` — authenticated session records
//! - `resource` — portal content (classes, committees, projects,
//!   announcements) with visibility scoping and lifecycle state

pub mod resource;
pub mod session;
pub mod user;

pub use resource::{LifecycleState, Resource, ResourceKind, VisibilityScope};
pub use session::Session;
pub use user::{Role, User, UserStatus};
