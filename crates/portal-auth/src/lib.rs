//! # portal-auth
//!
//! Authentication, session management, and the role/region authorization
//! engine for Kizuna Portal.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing
//! - `principal` — authenticated principal resolution
//! - `session` — session lifecycle (create, refresh, revoke, cleanup)
//! - `scope` — visibility scope evaluation (resource-shape-only)
//! - `policy` — the per-action authorization engine
//! - `directory` — the seam to the user persistence layer

pub mod directory;
pub mod jwt;
pub mod password;
pub mod policy;
pub mod principal;
pub mod scope;
pub mod session;

pub use directory::UserStore;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
pub use policy::{Decision, DenialReason, PolicyEngine};
pub use principal::{Principal, PrincipalResolver};
pub use session::{SessionCleanup, SessionManager, SessionStore};
