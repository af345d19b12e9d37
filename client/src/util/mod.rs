//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, time,
//! timers) from page logic so the same code paths compile for SSR.

pub mod clock;
pub mod storage;
