//! Content storage and services.

pub mod enrollment;
pub mod service;
pub mod store;

pub use enrollment::EnrollmentService;
pub use service::{CreateResourceInput, ResourceService, UpdateResourceInput};
pub use store::ResourceStore;
