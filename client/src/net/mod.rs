//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to our own server (connection settings), `firestore` talks to
//! the document store that holds administrator records.

pub mod api;
pub mod firestore;
