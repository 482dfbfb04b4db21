// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed access to the stored business collections and the audit log.

use partyrent::{ChangedCollection, State};
use partyrent_audit::AuditEntry;
use partyrent_domain::{Client, Item, Order, Supplier, User};

use crate::collection::Collection;
use crate::error::PersistenceError;
use crate::store::{RecordStore, load_records, store_records, try_load_records};

/// Loads every business collection into a state snapshot for reading.
///
/// Undecodable records are skipped, so the snapshot must not be written
/// back. Use [`try_load_state`] before a mutation.
pub fn load_state<S: RecordStore + ?Sized>(records: &mut S) -> State {
    State {
        items: load_records::<Item, S>(records, Collection::Items),
        orders: load_records::<Order, S>(records, Collection::Orders),
        clients: load_records::<Client, S>(records, Collection::Clients),
        suppliers: load_records::<Supplier, S>(records, Collection::Suppliers),
        users: load_records::<User, S>(records, Collection::Users),
    }
}

/// Loads every business collection into a state snapshot for a mutation.
///
/// # Errors
///
/// Returns `PersistenceError::Corrupt` if any stored record does not decode.
pub fn try_load_state<S: RecordStore + ?Sized>(
    records: &mut S,
) -> Result<State, PersistenceError> {
    Ok(State {
        items: try_load_records::<Item, S>(records, Collection::Items)?,
        orders: try_load_records::<Order, S>(records, Collection::Orders)?,
        clients: try_load_records::<Client, S>(records, Collection::Clients)?,
        suppliers: try_load_records::<Supplier, S>(records, Collection::Suppliers)?,
        users: try_load_records::<User, S>(records, Collection::Users)?,
    })
}

/// Writes back the one collection a transition changed.
///
/// # Errors
///
/// Returns an error if the collection cannot be saved.
pub fn save_changed<S: RecordStore + ?Sized>(
    records: &mut S,
    state: &State,
    changed: ChangedCollection,
) -> Result<(), PersistenceError> {
    let collection: Collection = changed.into();
    match changed {
        ChangedCollection::Items => store_records(records, collection, &state.items),
        ChangedCollection::Orders => store_records(records, collection, &state.orders),
        ChangedCollection::Clients => store_records(records, collection, &state.clients),
        ChangedCollection::Suppliers => store_records(records, collection, &state.suppliers),
        ChangedCollection::Users => store_records(records, collection, &state.users),
    }
}

/// Loads the audit log, oldest entry first.
pub fn load_audit_log<S: RecordStore + ?Sized>(records: &mut S) -> Vec<AuditEntry> {
    load_records::<AuditEntry, S>(records, Collection::AuditLog)
}

/// Appends one entry to the audit log.
///
/// # Errors
///
/// Returns an error if the stored log is corrupt or cannot be saved.
pub fn append_audit_entry<S: RecordStore + ?Sized>(
    records: &mut S,
    entry: &AuditEntry,
) -> Result<(), PersistenceError> {
    let mut log: Vec<serde_json::Value> = records.try_get_all(Collection::AuditLog)?;
    log.push(serde_json::to_value(entry)?);
    records.save(Collection::AuditLog, &log)
}
