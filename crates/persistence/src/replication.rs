// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort replication of saved collections to a remote mirror.
//!
//! Local writes never wait on the mirror. A save hands a snapshot of the
//! collection to a [`ReplicationHandle`], and a background task pushes the
//! snapshots to the mirror one at a time, in the order they were saved.
//! Mirror failures are logged and dropped; the next save of the same
//! collection carries the full state again.

use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

use crate::collection::Collection;
use crate::error::PersistenceError;
use crate::store::RecordStore;

/// Maximum number of documents written per mirror batch.
pub const BATCH_SIZE: usize = 450;

/// A full-collection snapshot queued for replication.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicationRequest {
    pub collection: Collection,
    pub records: Vec<Value>,
}

/// The single entry point for queueing replication work.
#[derive(Debug, Clone)]
pub struct ReplicationHandle {
    tx: mpsc::UnboundedSender<ReplicationRequest>,
}

impl ReplicationHandle {
    /// Creates a handle together with the receiving end of its queue.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ReplicationRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queues a collection snapshot. Never blocks and never fails.
    pub fn replicate(&self, collection: Collection, records: Vec<Value>) {
        let count: usize = records.len();
        if self
            .tx
            .send(ReplicationRequest {
                collection,
                records,
            })
            .is_err()
        {
            warn!(collection = %collection, count, "Replicator is gone, dropping snapshot");
        }
    }
}

/// A remote document store holding one document per record.
pub trait RemoteMirror: Send + Sync {
    /// Writes every record of a collection, returning how many were written.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Mirror` if the mirror cannot be written.
    fn push(
        &self,
        collection: Collection,
        records: Vec<Value>,
    ) -> impl Future<Output = Result<usize, PersistenceError>> + Send;

    /// Reads every record of a collection.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Mirror` if the mirror cannot be read.
    fn pull(
        &self,
        collection: Collection,
    ) -> impl Future<Output = Result<Vec<Value>, PersistenceError>> + Send;
}

/// Starts the background task that drains a handle's queue into a mirror.
///
/// The task ends once every [`ReplicationHandle`] clone has been dropped.
pub fn spawn_replicator<M>(mirror: M) -> (ReplicationHandle, JoinHandle<()>)
where
    M: RemoteMirror + 'static,
{
    let (handle, mut rx) = ReplicationHandle::channel();
    let task: JoinHandle<()> = tokio::spawn(async move {
        info!("Replicator started");
        while let Some(request) = rx.recv().await {
            let collection: Collection = request.collection;
            match mirror.push(collection, request.records).await {
                Ok(count) => debug!(collection = %collection, count, "Replicated collection"),
                Err(e) => error!(collection = %collection, error = %e, "Replication failed"),
            }
        }
        info!("Replicator stopped");
    });
    (handle, task)
}

/// A mirror laid out on the filesystem as `<root>/<collection>/<id>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryMirror {
    root: PathBuf,
}

impl DirectoryMirror {
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.mirror_name())
    }
}

/// The document name of a record, if it has a usable id.
fn document_id(record: &Value) -> Option<String> {
    let id: String = match record.get("id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let safe: bool = !id.is_empty()
        && !id.starts_with('.')
        && !id.contains(['/', '\\'])
        && !id.contains('\0');
    safe.then_some(id)
}

fn mirror_error(collection: Collection, err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::Mirror(format!("{}: {err}", collection.mirror_name()))
}

impl RemoteMirror for DirectoryMirror {
    async fn push(
        &self,
        collection: Collection,
        records: Vec<Value>,
    ) -> Result<usize, PersistenceError> {
        let dir: PathBuf = self.collection_dir(collection);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| mirror_error(collection, e))?;

        let mut documents: Vec<(String, Vec<u8>)> = Vec::with_capacity(records.len());
        for record in &records {
            let Some(id) = document_id(record) else {
                warn!(collection = %collection, "Skipping record without a usable id");
                continue;
            };
            let bytes: Vec<u8> =
                serde_json::to_vec(record).map_err(|e| mirror_error(collection, e))?;
            documents.push((id, bytes));
        }

        let live: HashSet<String> = documents.iter().map(|(id, _)| id.clone()).collect();

        for batch in documents.chunks(BATCH_SIZE) {
            let mut writes: JoinSet<std::io::Result<()>> = JoinSet::new();
            for (id, bytes) in batch {
                let path: PathBuf = dir.join(format!("{id}.json"));
                let bytes: Vec<u8> = bytes.clone();
                writes.spawn(async move { tokio::fs::write(path, bytes).await });
            }
            while let Some(joined) = writes.join_next().await {
                joined
                    .map_err(|e| mirror_error(collection, e))?
                    .map_err(|e| mirror_error(collection, e))?;
            }
        }

        // Drop documents whose records are gone from the collection.
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| mirror_error(collection, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| mirror_error(collection, e))?
        {
            let path: PathBuf = entry.path();
            let is_json: bool = path.extension().is_some_and(|ext| ext == "json");
            let stale: bool = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| !live.contains(stem));
            if is_json && stale {
                tokio::fs::remove_file(&path)
                    .await
                    .map_err(|e| mirror_error(collection, e))?;
            }
        }

        Ok(documents.len())
    }

    async fn pull(&self, collection: Collection) -> Result<Vec<Value>, PersistenceError> {
        let dir: PathBuf = self.collection_dir(collection);
        if !tokio::fs::try_exists(&dir)
            .await
            .map_err(|e| mirror_error(collection, e))?
        {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| mirror_error(collection, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| mirror_error(collection, e))?
        {
            let path: PathBuf = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut records: Vec<Value> = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes: Vec<u8> = tokio::fs::read(&path)
                .await
                .map_err(|e| mirror_error(collection, e))?;
            let record: Value =
                serde_json::from_slice(&bytes).map_err(|e| mirror_error(collection, e))?;
            records.push(record);
        }
        Ok(records)
    }
}

/// A store decorator that queues every `save` for replication.
///
/// Raw payload writes go to the inner store only.
#[derive(Debug)]
pub struct ReplicatingStore<S> {
    inner: S,
    handle: ReplicationHandle,
}

impl<S: RecordStore> ReplicatingStore<S> {
    pub const fn new(inner: S, handle: ReplicationHandle) -> Self {
        Self { inner, handle }
    }
}

impl<S: RecordStore> RecordStore for ReplicatingStore<S> {
    fn read_payload(&mut self, collection: Collection) -> Result<Option<String>, PersistenceError> {
        self.inner.read_payload(collection)
    }

    fn write_payload(
        &mut self,
        collection: Collection,
        payload: String,
    ) -> Result<(), PersistenceError> {
        self.inner.write_payload(collection, payload)
    }

    fn save(&mut self, collection: Collection, records: &[Value]) -> Result<(), PersistenceError> {
        self.inner.save(collection, records)?;
        self.handle.replicate(collection, records.to_vec());
        Ok(())
    }
}

/// Copies mirror contents into a local store.
///
/// Only non-empty mirror collections overwrite local data. Collections the
/// mirror cannot serve are logged and left alone. Returns the collections
/// that were replaced.
pub async fn pull_from_mirror<M, S>(mirror: &M, store: &mut S) -> Vec<Collection>
where
    M: RemoteMirror,
    S: RecordStore + ?Sized,
{
    info!("Pulling collections from mirror");
    let mut replaced: Vec<Collection> = Vec::new();

    for collection in Collection::ALL {
        match mirror.pull(collection).await {
            Ok(records) if records.is_empty() => {
                info!(collection = %collection, "Mirror is empty, keeping local data");
            }
            Ok(records) => match store.save(collection, &records) {
                Ok(()) => {
                    info!(collection = %collection, count = records.len(), "Pulled collection");
                    replaced.push(collection);
                }
                Err(e) => error!(collection = %collection, error = %e, "Failed to store pulled collection"),
            },
            Err(e) => error!(collection = %collection, error = %e, "Failed to pull collection"),
        }
    }

    info!(replaced = replaced.len(), "Mirror pull complete");
    replaced
}
