//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (mount checks, async requests,
//! navigation) and delegates decisions to `state` and the `gate` crate.

pub mod dashboard;
pub mod login;
