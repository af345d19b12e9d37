//! Portal configuration route.

use axum::Json;
use axum::extract::State;
use client::net::api::PortalConfig;

use crate::state::AppState;

/// `GET /api/config`: document-store settings for the browser.
pub async fn config(State(state): State<AppState>) -> Json<PortalConfig> {
    tracing::debug!(project_id = %state.portal.firestore.project_id, "serving portal config");
    Json(PortalConfig::clone(&state.portal))
}
