//! Integration tests driving the portal router end to end against
//! fully in-memory state.

mod helpers;

mod auth_test;
mod content_test;
mod enrollment_test;
mod guard_test;
