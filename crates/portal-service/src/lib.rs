//! # portal-service
//!
//! Application services for Kizuna Portal: the user directory, the
//! content store, and the resource/enrollment services that compose the
//! authorization engine with storage.
//!
//! Persistence here is in-memory — the production deployment swaps the
//! stores behind the same seams.

pub mod resource;
pub mod user;

pub use resource::{
    CreateResourceInput, EnrollmentService, ResourceService, ResourceStore, UpdateResourceInput,
};
pub use user::UserDirectory;
