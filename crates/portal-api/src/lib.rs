//! # portal-api
//!
//! Axum HTTP surface for Kizuna Portal: request guards, extractors,
//! DTOs, handlers, and the router.
//!
//! Handlers are deliberately thin. The route guard does the coarse
//! role/region gate before a handler runs; the services consult the
//! policy engine for the fine-grained, per-resource gate.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
