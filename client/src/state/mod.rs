//! Page-scoped client state.
//!
//! DESIGN
//! ======
//! Each page owns one state value held in an `RwSignal`. UI toggles are
//! explicit enums rather than loose booleans so every combination the view
//! can be in is named.

pub mod login;
pub mod session;
