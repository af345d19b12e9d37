//! Remote document store seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build talks to Firestore over REST (`client::net::firestore`);
//! tests use [`MemoryDocumentStore`]. Both only need two operations: list a
//! whole collection and patch fields on one document.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::StoreError;

/// Collection holding administrator credential documents.
pub const ADMIN_COLLECTION: &str = "adminlogin";

/// A fetched document: its identifier plus string-valued fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub fields: BTreeMap<String, String>,
}

/// Minimal document-store API used by the credential matcher.
///
/// Futures are not `Send`: every caller runs on the single-threaded browser
/// event loop.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Fetch every document in `collection`, in store order.
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Overwrite `fields` on the document `id`, leaving other fields intact.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), StoreError>;
}

/// A recorded `update_by_id` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateCall {
    pub collection: String,
    pub id: String,
    pub fields: BTreeMap<String, String>,
}

/// In-memory document store that records update calls.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RefCell<BTreeMap<String, Vec<Document>>>,
    updates: RefCell<Vec<UpdateCall>>,
    failure: RefCell<Option<StoreError>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of `collection`.
    pub fn seed(&self, collection: &str, docs: Vec<Document>) {
        self.collections.borrow_mut().insert(collection.to_owned(), docs);
    }

    /// Make every following call fail with `err` until [`Self::recover`].
    pub fn fail_with(&self, err: StoreError) {
        *self.failure.borrow_mut() = Some(err);
    }

    pub fn recover(&self) {
        *self.failure.borrow_mut() = None;
    }

    /// Update calls received so far, including ones that were rejected.
    #[must_use]
    pub fn updates(&self) -> Vec<UpdateCall> {
        self.updates.borrow().clone()
    }

    #[must_use]
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections.borrow().get(collection).cloned().unwrap_or_default()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.borrow().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryDocumentStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.check_failure()?;
        Ok(self.documents(collection))
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), StoreError> {
        self.updates.borrow_mut().push(UpdateCall {
            collection: collection.to_owned(),
            id: id.to_owned(),
            fields: fields.clone(),
        });
        self.check_failure()?;

        let mut collections = self.collections.borrow_mut();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::Status { status: 404, message: format!("document {id} not found") })?;
        for (key, value) in fields {
            doc.fields.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
