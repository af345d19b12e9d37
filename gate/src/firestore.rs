//! Firestore REST document codec.
//!
//! The HTTP transport lives in the client; this module only builds URLs and
//! converts between Firestore's typed-value JSON and flat [`Document`]s.
//!
//! WIRE FORMAT
//! ===========
//! ```text
//! { "documents": [ { "name": "projects/p/databases/(default)/documents/adminlogin/ID",
//!                    "fields": { "email": { "stringValue": "a@b.c" } } } ],
//!   "nextPageToken": "..." }
//! ```

#[cfg(test)]
#[path = "firestore_test.rs"]
mod firestore_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::StoreError;
use crate::store::Document;

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";
/// Page size requested when listing a collection.
pub const LIST_PAGE_SIZE: u32 = 300;

/// Connection settings for one Firestore database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_owned()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl FirestoreConfig {
    #[must_use]
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            database: default_database(),
            base_url: default_base_url(),
        }
    }

    fn collection_url(&self, collection: &str) -> Result<Url, StoreError> {
        let raw = format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.database,
            collection
        );
        Url::parse(&raw).map_err(|e| StoreError::Config(format!("invalid Firestore URL: {e}")))
    }

    /// URL for one page of `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the configured base URL is not a valid URL.
    pub fn list_url(&self, collection: &str, page_token: Option<&str>) -> Result<String, StoreError> {
        let mut url = self.collection_url(collection)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("pageSize", &LIST_PAGE_SIZE.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
            query.append_pair("key", &self.api_key);
        }
        Ok(url.into())
    }

    /// URL for a partial update of `id` that only touches `field_paths`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the configured base URL is not a valid URL.
    pub fn patch_url<'a>(
        &self,
        collection: &str,
        id: &str,
        field_paths: impl IntoIterator<Item = &'a str>,
    ) -> Result<String, StoreError> {
        let mut url = self.collection_url(collection)?;
        url.path_segments_mut()
            .map_err(|()| StoreError::Config("Firestore base URL cannot hold a path".to_owned()))?
            .push(id);
        {
            let mut query = url.query_pairs_mut();
            for path in field_paths {
                query.append_pair("updateMask.fieldPaths", path);
            }
            query.append_pair("key", &self.api_key);
        }
        Ok(url.into())
    }
}

/// One page of a collection listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListPage {
    pub documents: Vec<Document>,
    pub next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Decode a `documents.list` response body.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] when the body is not a list response or a
/// document name has no identifier segment.
pub fn decode_list_page(body: &str) -> Result<ListPage, StoreError> {
    let raw: RawListResponse = serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))?;
    let documents = raw
        .documents
        .into_iter()
        .map(decode_document)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ListPage {
        documents,
        next_page_token: raw.next_page_token.filter(|t| !t.is_empty()),
    })
}

fn decode_document(raw: RawDocument) -> Result<Document, StoreError> {
    let id = raw
        .name
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StoreError::Decode(format!("document name without id: {}", raw.name)))?
        .to_owned();
    let fields = raw
        .fields
        .iter()
        .filter_map(|(key, value)| typed_value_to_string(value).map(|v| (key.clone(), v)))
        .collect();
    Ok(Document { id, fields })
}

/// Flatten a Firestore typed value to a string. Maps and arrays are skipped.
fn typed_value_to_string(value: &Value) -> Option<String> {
    let (kind, inner) = value.as_object()?.iter().next()?;
    match (kind.as_str(), inner) {
        ("nullValue", _) => Some(String::new()),
        (_, Value::String(s)) => Some(s.clone()),
        ("booleanValue" | "doubleValue", v @ (Value::Bool(_) | Value::Number(_))) => Some(v.to_string()),
        _ => None,
    }
}

/// Encode `fields` as a `documents.patch` request body.
#[must_use]
pub fn encode_update_body(fields: &BTreeMap<String, String>) -> Value {
    let encoded = fields
        .iter()
        .map(|(key, value)| (key.clone(), serde_json::json!({ "stringValue": value })))
        .collect::<Map<_, _>>();
    serde_json::json!({ "fields": encoded })
}

/// Best-effort message from a Firestore error body (`{"error": {"message": ...}}`).
#[must_use]
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}
