// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use super::helpers::{supplier_record, temp_mirror_dir};
use crate::{
    BATCH_SIZE, Collection, DirectoryMirror, MemoryStore, RecordStore, RemoteMirror,
    ReplicatingStore, ReplicationHandle, ReplicationRequest, pull_from_mirror, spawn_replicator,
};

fn cleanup(dir: &Path) {
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_directory_mirror_push_then_pull() {
    let dir: PathBuf = temp_mirror_dir("push-pull");
    let mirror: DirectoryMirror = DirectoryMirror::new(&dir);

    let written: usize = mirror
        .push(
            Collection::Suppliers,
            vec![supplier_record("s-1", "A"), supplier_record("s-2", "B")],
        )
        .await
        .unwrap();
    assert_eq!(written, 2);
    assert!(dir.join("suppliers").join("s-1.json").exists());

    let pulled: Vec<Value> = mirror.pull(Collection::Suppliers).await.unwrap();
    assert_eq!(pulled, vec![supplier_record("s-1", "A"), supplier_record("s-2", "B")]);

    cleanup(&dir);
}

#[tokio::test]
async fn test_push_prunes_removed_records() {
    let dir: PathBuf = temp_mirror_dir("prune");
    let mirror: DirectoryMirror = DirectoryMirror::new(&dir);
    mirror
        .push(
            Collection::Suppliers,
            vec![supplier_record("s-1", "A"), supplier_record("s-2", "B")],
        )
        .await
        .unwrap();

    mirror
        .push(Collection::Suppliers, vec![supplier_record("s-2", "B")])
        .await
        .unwrap();

    let pulled: Vec<Value> = mirror.pull(Collection::Suppliers).await.unwrap();
    assert_eq!(pulled.len(), 1);
    assert_eq!(pulled[0]["id"], "s-2");

    cleanup(&dir);
}

#[tokio::test]
async fn test_push_skips_records_without_usable_id() {
    let dir: PathBuf = temp_mirror_dir("bad-ids");
    let mirror: DirectoryMirror = DirectoryMirror::new(&dir);

    let written: usize = mirror
        .push(
            Collection::Items,
            vec![
                json!({ "name": "no id" }),
                json!({ "id": "../escape" }),
                json!({ "id": 7 }),
            ],
        )
        .await
        .unwrap();

    assert_eq!(written, 1);
    assert!(dir.join("items").join("7.json").exists());

    cleanup(&dir);
}

#[tokio::test]
async fn test_push_larger_than_one_batch() {
    let dir: PathBuf = temp_mirror_dir("batches");
    let mirror: DirectoryMirror = DirectoryMirror::new(&dir);
    let records: Vec<Value> = (0..=BATCH_SIZE)
        .map(|n| json!({ "id": format!("r-{n:04}") }))
        .collect();

    let written: usize = mirror.push(Collection::Orders, records).await.unwrap();

    assert_eq!(written, BATCH_SIZE + 1);
    assert_eq!(
        mirror.pull(Collection::Orders).await.unwrap().len(),
        BATCH_SIZE + 1
    );

    cleanup(&dir);
}

#[tokio::test]
async fn test_pull_of_missing_collection_is_empty() {
    let dir: PathBuf = temp_mirror_dir("missing");
    let mirror: DirectoryMirror = DirectoryMirror::new(&dir);
    assert!(mirror.pull(Collection::Clients).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pull_from_mirror_keeps_local_data_when_mirror_empty() {
    let dir: PathBuf = temp_mirror_dir("pull");
    let mirror: DirectoryMirror = DirectoryMirror::new(&dir);
    mirror
        .push(Collection::Suppliers, vec![supplier_record("s-9", "Remote")])
        .await
        .unwrap();

    let mut store: MemoryStore = MemoryStore::new();
    store
        .save(Collection::Clients, &[json!({ "id": "c-1" })])
        .unwrap();

    let replaced: Vec<Collection> = pull_from_mirror(&mirror, &mut store).await;

    assert_eq!(replaced, vec![Collection::Suppliers]);
    assert_eq!(store.get_all(Collection::Suppliers)[0]["id"], "s-9");
    assert_eq!(store.get_all(Collection::Clients).len(), 1);

    cleanup(&dir);
}

#[tokio::test]
async fn test_pull_from_mirror_skips_unreadable_collection() {
    let dir: PathBuf = temp_mirror_dir("unreadable");
    std::fs::create_dir_all(dir.join("items")).unwrap();
    std::fs::write(dir.join("items").join("i-1.json"), "{broken").unwrap();
    let mirror: DirectoryMirror = DirectoryMirror::new(&dir);

    let mut store: MemoryStore = MemoryStore::new();
    store
        .save(Collection::Items, &[json!({ "id": "local" })])
        .unwrap();

    let replaced: Vec<Collection> = pull_from_mirror(&mirror, &mut store).await;

    assert!(replaced.is_empty());
    assert_eq!(store.get_all(Collection::Items)[0]["id"], "local");

    cleanup(&dir);
}

#[tokio::test]
async fn test_replicating_store_queues_each_save() {
    let (handle, mut rx) = ReplicationHandle::channel();
    let mut store: ReplicatingStore<MemoryStore> =
        ReplicatingStore::new(MemoryStore::new(), handle);

    store
        .save(Collection::Suppliers, &[supplier_record("s-1", "A")])
        .unwrap();

    let request: ReplicationRequest = rx.recv().await.unwrap();
    assert_eq!(request.collection, Collection::Suppliers);
    assert_eq!(request.records, vec![supplier_record("s-1", "A")]);
    assert_eq!(store.get_all(Collection::Suppliers).len(), 1);
}

#[tokio::test]
async fn test_failed_local_save_is_not_replicated() {
    let (handle, mut rx) = ReplicationHandle::channel();
    let mut store: ReplicatingStore<MemoryStore> =
        ReplicatingStore::new(MemoryStore::with_capacity_bytes(4), handle);

    assert!(
        store
            .save(Collection::Suppliers, &[supplier_record("s-1", "A")])
            .is_err()
    );

    drop(store);
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_replicator_pushes_to_mirror() {
    let dir: PathBuf = temp_mirror_dir("replicator");
    let (handle, task) = spawn_replicator(DirectoryMirror::new(&dir));
    let mut store: ReplicatingStore<MemoryStore> =
        ReplicatingStore::new(MemoryStore::new(), handle);

    store
        .save(Collection::Suppliers, &[supplier_record("s-1", "A")])
        .unwrap();
    store
        .save(
            Collection::Suppliers,
            &[supplier_record("s-1", "A"), supplier_record("s-2", "B")],
        )
        .unwrap();

    drop(store);
    task.await.unwrap();

    let pulled: Vec<Value> = DirectoryMirror::new(&dir)
        .pull(Collection::Suppliers)
        .await
        .unwrap();
    assert_eq!(pulled.len(), 2);

    cleanup(&dir);
}

#[tokio::test]
async fn test_replicate_after_replicator_stops_does_not_panic() {
    let (handle, rx) = ReplicationHandle::channel();
    drop(rx);
    handle.replicate(Collection::Items, vec![json!({ "id": "i-1" })]);
}
