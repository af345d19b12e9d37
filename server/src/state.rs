//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! only carries the document-store connection settings handed to browsers;
//! sessions and credentials never touch the server.

use std::sync::Arc;

use client::net::api::PortalConfig;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<PortalConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self { portal: Arc::new(PortalConfig { firestore: config.firestore.clone() }) }
    }
}
