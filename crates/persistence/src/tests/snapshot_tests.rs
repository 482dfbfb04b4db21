// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent::{ChangedCollection, State};
use partyrent_audit::AuditEntry;

use super::helpers::{audit_record, supplier_record};
use crate::{
    Collection, MemoryStore, PersistenceError, RecordStore, append_audit_entry, load_audit_log,
    load_state, save_changed, try_load_state,
};

#[test]
fn test_load_state_reads_every_collection() {
    let mut store: MemoryStore = MemoryStore::new();
    store
        .save(Collection::Suppliers, &[supplier_record("s-1", "Flores")])
        .unwrap();
    store.insert_raw(Collection::Items, "garbage");

    let state: State = load_state(&mut store);
    assert_eq!(state.suppliers.len(), 1);
    assert!(state.items.is_empty());
    assert!(state.orders.is_empty());
}

#[test]
fn test_save_changed_writes_only_that_collection() {
    let mut store: MemoryStore = MemoryStore::new();
    store
        .save(Collection::Suppliers, &[supplier_record("s-1", "Flores")])
        .unwrap();
    let mut state: State = load_state(&mut store);
    state.suppliers[0].name = "Flores Renamed".to_string();

    save_changed(&mut store, &state, ChangedCollection::Suppliers).unwrap();

    let reloaded: State = load_state(&mut store);
    assert_eq!(reloaded.suppliers[0].name, "Flores Renamed");
    assert!(store.get_all(Collection::Items).is_empty());
}

#[test]
fn test_audit_log_appends_in_order() {
    let mut store: MemoryStore = MemoryStore::new();
    store
        .save(Collection::AuditLog, &[audit_record("audit-1", "s-1")])
        .unwrap();
    let entry: AuditEntry = serde_json::from_value(audit_record("audit-2", "s-2")).unwrap();

    append_audit_entry(&mut store, &entry).unwrap();

    let log: Vec<AuditEntry> = load_audit_log(&mut store);
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].id, "audit-1");
    assert_eq!(log[1].id, "audit-2");
}

#[test]
fn test_audit_append_on_full_store_fails() {
    let mut store: MemoryStore = MemoryStore::with_capacity_bytes(8);
    let entry: AuditEntry = serde_json::from_value(audit_record("audit-1", "s-1")).unwrap();

    let err = append_audit_entry(&mut store, &entry).unwrap_err();
    assert!(err.is_storage_full());
}

#[test]
fn test_mutation_load_refuses_undecodable_record() {
    let mut store: MemoryStore = MemoryStore::new();
    let mut broken = supplier_record("s-2", "Tecidos");
    broken["created_at"] = serde_json::json!(20_240_101);
    store
        .save(
            Collection::Suppliers,
            &[supplier_record("s-1", "Flores"), broken],
        )
        .unwrap();

    let read: State = load_state(&mut store);
    assert_eq!(read.suppliers.len(), 1);

    let err: PersistenceError = try_load_state(&mut store).unwrap_err();
    assert!(matches!(err, PersistenceError::Corrupt(ref msg) if msg.contains("s-2")));
    assert_eq!(store.get_all(Collection::Suppliers).len(), 2);
}

#[test]
fn test_mutation_load_refuses_corrupt_payload() {
    let mut store: MemoryStore = MemoryStore::new();
    store.insert_raw(Collection::Orders, "[{\"id\":");

    assert!(load_state(&mut store).orders.is_empty());
    assert!(matches!(
        try_load_state(&mut store),
        Err(PersistenceError::Corrupt(_))
    ));
}

#[test]
fn test_audit_append_keeps_corrupt_log() {
    let mut store: MemoryStore = MemoryStore::new();
    store.insert_raw(Collection::AuditLog, "not a log");
    let entry: AuditEntry = serde_json::from_value(audit_record("audit-1", "s-1")).unwrap();

    let result = append_audit_entry(&mut store, &entry);

    assert!(matches!(result, Err(PersistenceError::Corrupt(_))));
    assert_eq!(
        store.read_payload(Collection::AuditLog).unwrap().as_deref(),
        Some("not a log")
    );
}
