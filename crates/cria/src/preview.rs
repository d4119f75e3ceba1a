//! In-process preview handles for loaded creatives.
//!
//! Each creative gets a revocable `cria://<uuid>` handle when it is loaded.
//! The store keeps the preview bytes alive until the handle is revoked;
//! revoking twice is a no-op that reports `false`, so callers can verify the
//! exactly-once contract. An unrevoked handle is a leak.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

#[derive(Debug, Clone)]
struct PreviewEntry {
    mime: String,
    bytes: Arc<Vec<u8>>,
}

/// A revocable reference to preview bytes held by a [`PreviewStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    id: Uuid,
    uri: String,
}

impl PreviewHandle {
    /// The `cria://` URI renderers may show to the user.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Registry of live preview entries.
#[derive(Debug, Default)]
pub struct PreviewStore {
    entries: Mutex<HashMap<Uuid, PreviewEntry>>,
}

impl PreviewStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register preview bytes and hand back the revocable handle.
    pub fn create(&self, mime: &str, bytes: Arc<Vec<u8>>) -> PreviewHandle {
        let id = Uuid::new_v4();
        let handle = PreviewHandle {
            id,
            uri: format!("cria://{id}"),
        };
        let entry = PreviewEntry {
            mime: mime.to_string(),
            bytes,
        };
        self.entries
            .lock()
            .expect("preview store lock poisoned")
            .insert(id, entry);
        handle
    }

    /// Release a handle. Returns `true` the first time, `false` for a handle
    /// that was already revoked (or never belonged to this store).
    pub fn revoke(&self, handle: &PreviewHandle) -> bool {
        self.entries
            .lock()
            .expect("preview store lock poisoned")
            .remove(&handle.id)
            .is_some()
    }

    /// Look up the bytes behind a live handle.
    pub fn resolve(&self, handle: &PreviewHandle) -> Option<(String, Arc<Vec<u8>>)> {
        self.entries
            .lock()
            .expect("preview store lock poisoned")
            .get(&handle.id)
            .map(|entry| (entry.mime.clone(), Arc::clone(&entry.bytes)))
    }

    /// Number of live (unrevoked) entries.
    pub fn live_count(&self) -> usize {
        self.entries
            .lock()
            .expect("preview store lock poisoned")
            .len()
    }
}
