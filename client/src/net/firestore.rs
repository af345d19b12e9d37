//! Firestore REST transport implementing `gate::DocumentStore`.
//!
//! URL building and (de)serialization live in `gate::firestore`; this module
//! only performs the HTTP exchange. Listing follows `nextPageToken` until the
//! collection is exhausted.

#![allow(clippy::unused_async)]

use std::collections::BTreeMap;

use async_trait::async_trait;
use gate::StoreError;
use gate::firestore::FirestoreConfig;
use gate::store::{Document, DocumentStore};

/// Document store over the Firestore REST API.
#[derive(Clone, Debug)]
pub struct FirestoreStore {
    config: FirestoreConfig,
}

impl FirestoreStore {
    #[must_use]
    pub fn new(config: FirestoreConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }
}

#[cfg(feature = "hydrate")]
async fn read_body(resp: &gloo_net::http::Response) -> Result<String, StoreError> {
    let body = resp.text().await.map_err(|e| StoreError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(StoreError::Status {
            status: resp.status(),
            message: gate::firestore::error_message(&body),
        });
    }
    Ok(body)
}

#[async_trait(?Send)]
impl DocumentStore for FirestoreStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let mut documents = Vec::new();
            let mut page_token: Option<String> = None;
            loop {
                let url = self.config.list_url(collection, page_token.as_deref())?;
                let resp = gloo_net::http::Request::get(&url)
                    .send()
                    .await
                    .map_err(|e| StoreError::Transport(e.to_string()))?;
                let page = gate::firestore::decode_list_page(&read_body(&resp).await?)?;
                documents.extend(page.documents);
                match page.next_page_token {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
            Ok(documents)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = collection;
            Err(StoreError::Transport("not available on server".to_owned()))
        }
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self
                .config
                .patch_url(collection, id, fields.keys().map(String::as_str))?;
            let body = gate::firestore::encode_update_body(fields);
            let resp = gloo_net::http::Request::patch(&url)
                .json(&body)
                .map_err(|e| StoreError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| StoreError::Transport(e.to_string()))?;
            read_body(&resp).await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (collection, id, fields);
            Err(StoreError::Transport("not available on server".to_owned()))
        }
    }
}
