// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use crate::collection::Collection;
use crate::error::PersistenceError;
use crate::store::RecordStore;

/// An in-process record store.
///
/// An optional byte capacity bounds the total size of all payloads, which
/// lets callers exercise the storage-full path.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    payloads: HashMap<Collection, String>,
    capacity_bytes: Option<usize>,
}

impl MemoryStore {
    /// Creates an empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that holds at most `capacity_bytes` of payload.
    #[must_use]
    pub fn with_capacity_bytes(capacity_bytes: usize) -> Self {
        Self {
            payloads: HashMap::new(),
            capacity_bytes: Some(capacity_bytes),
        }
    }

    /// Stores a payload verbatim, bypassing encoding.
    pub fn insert_raw(&mut self, collection: Collection, payload: &str) {
        self.payloads.insert(collection, payload.to_string());
    }

    /// Total bytes currently stored.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.payloads.values().map(String::len).sum()
    }
}

impl RecordStore for MemoryStore {
    fn read_payload(&mut self, collection: Collection) -> Result<Option<String>, PersistenceError> {
        Ok(self.payloads.get(&collection).cloned())
    }

    fn write_payload(
        &mut self,
        collection: Collection,
        payload: String,
    ) -> Result<(), PersistenceError> {
        if let Some(capacity) = self.capacity_bytes {
            let replaced: usize = self.payloads.get(&collection).map_or(0, String::len);
            let needed: usize = self.used_bytes() - replaced + payload.len();
            if needed > capacity {
                return Err(PersistenceError::StorageFull(format!(
                    "{collection} needs {needed} bytes, capacity is {capacity}"
                )));
            }
        }
        self.payloads.insert(collection, payload);
        Ok(())
    }
}
