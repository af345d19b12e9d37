//! Browser `localStorage` adapter for the session pair.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never touch `web_sys::Storage` directly; they go through
//! [`session_store`] so the gate logic only sees the `SessionStore` trait.
//! Outside the browser (SSR) every read misses and every write is dropped.

use gate::session::{KeyValueStorage, KvSessionStore};

/// [`KeyValueStorage`] backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.set_item(key, value).is_err() {
                leptos::logging::warn!("localStorage write failed for {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Session store over browser storage.
#[must_use]
pub fn session_store() -> KvSessionStore<BrowserStorage> {
    KvSessionStore::new(BrowserStorage)
}
