// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent_domain::{Client, Item, Order, OrderStatus};
use partyrent_persistence::{Collection, MemoryStore, PersistenceError, RecordStore, SqliteStore};
use serde_json::{Value, json};

use super::helpers::{
    client_draft, create_test_actor, create_test_service, create_test_service_with_store,
    item_draft, order_draft, seed_rental,
};
use crate::{ApiError, RentalService};

/// A store whose audit log cannot be written.
#[derive(Default)]
struct BrokenAuditStore {
    inner: MemoryStore,
}

impl RecordStore for BrokenAuditStore {
    fn read_payload(&mut self, collection: Collection) -> Result<Option<String>, PersistenceError> {
        self.inner.read_payload(collection)
    }

    fn write_payload(
        &mut self,
        collection: Collection,
        payload: String,
    ) -> Result<(), PersistenceError> {
        if collection == Collection::AuditLog {
            return Err(PersistenceError::Storage(String::from("audit log is read-only")));
        }
        self.inner.write_payload(collection, payload)
    }
}

#[test]
fn test_full_store_reports_storage_full() {
    let mut service: RentalService<MemoryStore> =
        create_test_service_with_store(MemoryStore::with_capacity_bytes(64));

    let result: Result<Item, ApiError> =
        service.create_item(&create_test_actor(), item_draft("Mesa", 2));

    assert!(matches!(result, Err(ApiError::StorageFull { .. })));
    assert!(service.list_items().is_empty());
}

#[test]
fn test_audit_failure_keeps_primary_write() {
    let mut service: RentalService<BrokenAuditStore> =
        create_test_service_with_store(BrokenAuditStore::default());

    let result: Result<Client, ApiError> = service.create_client(
        &create_test_actor(),
        client_draft("Maria Silva", "529.982.247-25"),
    );

    assert!(matches!(result, Err(ApiError::Storage { .. })));
    assert_eq!(service.list_clients().len(), 1);
    assert!(service.audit_entries().is_empty());
}

#[test]
fn test_corrupt_collection_reads_as_empty_but_blocks_writes() {
    let mut store: MemoryStore = MemoryStore::new();
    store.insert_raw(Collection::Items, "not json at all");
    let mut service: RentalService<MemoryStore> = create_test_service_with_store(store);

    assert!(service.list_items().is_empty());
    let result: Result<Item, ApiError> =
        service.create_item(&create_test_actor(), item_draft("Mesa", 2));

    assert!(matches!(result, Err(ApiError::Storage { .. })));
    assert_eq!(
        service
            .store_mut()
            .read_payload(Collection::Items)
            .unwrap()
            .as_deref(),
        Some("not json at all")
    );
    assert!(service.audit_entries().is_empty());
}

#[test]
fn test_undecodable_order_blocks_overbooking() {
    let mut service: RentalService<MemoryStore> = create_test_service();
    let (client, item) = seed_rental(&mut service);
    let held: Order = service
        .create_order(
            &create_test_actor(),
            order_draft(
                &client.id,
                OrderStatus::ConfirmedPaid,
                "2024-03-10",
                "2024-03-12",
                &[(&item.id, 8)],
            ),
        )
        .unwrap();

    let mut orders: Vec<Value> = service.store_mut().get_all(Collection::Orders);
    assert_eq!(orders[0]["items"][0]["unit_value"], json!(5000));
    orders[0]["items"][0]["unit_value"] = json!(50.5);
    service.store_mut().save(Collection::Orders, &orders).unwrap();
    assert!(service.list_orders().is_empty());

    let result: Result<Order, ApiError> = service.create_order(
        &create_test_actor(),
        order_draft(
            &client.id,
            OrderStatus::ConfirmedPaid,
            "2024-03-11",
            "2024-03-11",
            &[(&item.id, 9)],
        ),
    );

    assert!(matches!(result, Err(ApiError::Storage { .. })));
    let stored: Vec<Value> = service.store_mut().get_all(Collection::Orders);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["id"], held.id.as_str());
}

#[test]
fn test_service_over_sqlite_store() {
    let mut service: RentalService<SqliteStore> =
        create_test_service_with_store(SqliteStore::new_in_memory().unwrap());
    let item: Item = service
        .create_item(&create_test_actor(), item_draft("Mesa", 2))
        .unwrap();

    assert_eq!(service.get_item(&item.id).unwrap(), item);
    assert_eq!(service.audit_entries().len(), 1);
}
