// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the party rental system.
//!
//! Every collection is stored as one JSON array under a fixed key. Saves
//! replace the whole array and reads return the latest saved snapshot.
//!
//! ## Backends
//!
//! - [`MemoryStore`] keeps payloads in process, optionally with a byte
//!   capacity so storage exhaustion can be exercised.
//! - [`SqliteStore`] keeps one row per collection in a Diesel-managed
//!   `SQLite` database. Tests use unique shared in-memory databases.
//!
//! ## Replication
//!
//! [`ReplicatingStore`] wraps any backend and queues each save for a
//! background task that pushes it to a [`RemoteMirror`]. Replication never
//! blocks or fails a local write.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

mod backend;
mod collection;
mod data_models;
mod diesel_schema;
mod error;
mod memory;
mod replication;
mod snapshot;
mod sqlite_store;
mod store;

#[cfg(test)]
mod tests;

pub use collection::Collection;
pub use error::PersistenceError;
pub use memory::MemoryStore;
pub use replication::{
    BATCH_SIZE, DirectoryMirror, RemoteMirror, ReplicatingStore, ReplicationHandle,
    ReplicationRequest, pull_from_mirror, spawn_replicator,
};
pub use snapshot::{
    append_audit_entry, load_audit_log, load_state, save_changed, try_load_state,
};
pub use sqlite_store::SqliteStore;
pub use store::{RecordStore, load_records, store_records, try_load_records};
