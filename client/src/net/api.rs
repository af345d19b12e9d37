//! REST helpers for communicating with the portal server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints
//! are only meaningful in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use gate::StoreError;
use gate::firestore::FirestoreConfig;
use serde::{Deserialize, Serialize};

use super::firestore::FirestoreStore;

pub const CONFIG_ENDPOINT: &str = "/api/config";

/// Body of `GET /api/config`. Shared with the server, which serializes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub firestore: FirestoreConfig,
}

#[cfg(any(test, feature = "hydrate"))]
fn config_failed_message(status: u16) -> String {
    format!("config request failed: {status}")
}

/// Fetch document-store connection settings from `/api/config`.
///
/// # Errors
///
/// Returns [`StoreError::Config`] if the request fails, the server responds
/// with a non-OK status, or the body is malformed.
pub async fn fetch_portal_config() -> Result<PortalConfig, StoreError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(CONFIG_ENDPOINT)
            .send()
            .await
            .map_err(|e| StoreError::Config(e.to_string()))?;
        if !resp.ok() {
            return Err(StoreError::Config(config_failed_message(resp.status())));
        }
        resp.json::<PortalConfig>()
            .await
            .map_err(|e| StoreError::Config(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(StoreError::Config("not available on server".to_owned()))
    }
}

/// Build the administrator document store from server-provided settings.
///
/// # Errors
///
/// Same as [`fetch_portal_config`].
pub async fn admin_store() -> Result<FirestoreStore, StoreError> {
    let config = fetch_portal_config().await?;
    Ok(FirestoreStore::new(config.firestore))
}
