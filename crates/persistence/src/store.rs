// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The record store contract.
//!
//! A store holds one JSON array per collection. Saves replace the whole
//! array (last write wins) and reads return the latest saved snapshot.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::collection::Collection;
use crate::error::PersistenceError;

/// Durable keyed collections of JSON records.
///
/// Backends implement the raw payload operations. `get_all` and `save`
/// are provided on top of them.
pub trait RecordStore {
    /// Reads the stored payload of a collection, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read_payload(&mut self, collection: Collection) -> Result<Option<String>, PersistenceError>;

    /// Replaces the stored payload of a collection.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StorageFull` when the backend is out of
    /// space and `PersistenceError::Storage` for any other failure.
    fn write_payload(
        &mut self,
        collection: Collection,
        payload: String,
    ) -> Result<(), PersistenceError>;

    /// Returns every record of a collection, refusing corrupt payloads.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Corrupt` if the stored payload is not a
    /// JSON array, or the backend's error if it cannot be read.
    fn try_get_all(&mut self, collection: Collection) -> Result<Vec<Value>, PersistenceError> {
        let Some(payload) = self.read_payload(collection)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str::<Vec<Value>>(&payload)
            .map_err(|e| PersistenceError::Corrupt(format!("{collection}: {e}")))
    }

    /// Returns every record of a collection.
    ///
    /// Never fails. Unreadable or corrupt payloads are logged and read as an
    /// empty collection.
    fn get_all(&mut self, collection: Collection) -> Vec<Value> {
        self.try_get_all(collection).unwrap_or_else(|e| {
            warn!(collection = %collection, error = %e, "Reading collection as empty");
            Vec::new()
        })
    }

    /// Replaces every record of a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be encoded or written.
    fn save(&mut self, collection: Collection, records: &[Value]) -> Result<(), PersistenceError> {
        let payload: String = serde_json::to_string(records)?;
        debug!(collection = %collection, count = records.len(), "Saving collection");
        self.write_payload(collection, payload)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn read_payload(&mut self, collection: Collection) -> Result<Option<String>, PersistenceError> {
        (**self).read_payload(collection)
    }

    fn write_payload(
        &mut self,
        collection: Collection,
        payload: String,
    ) -> Result<(), PersistenceError> {
        (**self).write_payload(collection, payload)
    }

    fn try_get_all(&mut self, collection: Collection) -> Result<Vec<Value>, PersistenceError> {
        (**self).try_get_all(collection)
    }

    fn get_all(&mut self, collection: Collection) -> Vec<Value> {
        (**self).get_all(collection)
    }

    fn save(&mut self, collection: Collection, records: &[Value]) -> Result<(), PersistenceError> {
        (**self).save(collection, records)
    }
}

/// Loads a collection as typed records.
///
/// Records that do not decode as `T` are logged and skipped.
pub fn load_records<T, S>(store: &mut S, collection: Collection) -> Vec<T>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    store
        .get_all(collection)
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<T>(record) {
            Ok(typed) => Some(typed),
            Err(e) => {
                warn!(collection = %collection, error = %e, "Skipping undecodable record");
                None
            }
        })
        .collect()
}

/// Loads a collection as typed records, failing on the first record that
/// does not decode as `T`.
///
/// Mutations go through this so that a record they cannot see is never
/// written away.
///
/// # Errors
///
/// Returns `PersistenceError::Corrupt` naming the offending record, or the
/// error of [`RecordStore::try_get_all`].
pub fn try_load_records<T, S>(
    store: &mut S,
    collection: Collection,
) -> Result<Vec<T>, PersistenceError>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    store
        .try_get_all(collection)?
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id: String = record
                .get("id")
                .and_then(Value::as_str)
                .map_or_else(|| format!("#{index}"), str::to_string);
            serde_json::from_value::<T>(record).map_err(|e| {
                PersistenceError::Corrupt(format!("{collection} record {id}: {e}"))
            })
        })
        .collect()
}

/// Saves typed records as a collection.
///
/// # Errors
///
/// Returns an error if a record cannot be encoded or the write fails.
pub fn store_records<T, S>(
    store: &mut S,
    collection: Collection,
    records: &[T],
) -> Result<(), PersistenceError>
where
    T: Serialize,
    S: RecordStore + ?Sized,
{
    let values: Vec<Value> = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;
    store.save(collection, &values)
}
