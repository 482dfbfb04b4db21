// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::backend;
use crate::collection::Collection;
use crate::data_models::{CollectionRow, NewCollectionRow};
use crate::diesel_schema::collections;
use crate::error::PersistenceError;
use crate::store::RecordStore;

/// Unique suffix for each in-memory database so tests stay isolated.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A record store backed by a single `SQLite` table.
///
/// Each collection is one row keyed by its storage key.
pub struct SqliteStore {
    conn: SqliteConnection,
}

impl SqliteStore {
    /// Creates a store over a fresh shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url: String = format!("file:partyrent_memdb_{db_id}?mode=memory&cache=shared");
        let conn: SqliteConnection = backend::sqlite::initialize_database(&url)?;
        Ok(Self { conn })
    }

    /// Creates a store over a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database
    /// cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::DatabaseConnectionFailed("Invalid database path".to_string())
        })?;
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        Ok(Self { conn })
    }

    /// Returns the last time a collection was written, if ever.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn updated_at(&mut self, collection: Collection) -> Result<Option<String>, PersistenceError> {
        Ok(self
            .find_row(collection)?
            .map(|row: CollectionRow| row.updated_at))
    }

    fn find_row(&mut self, collection: Collection) -> Result<Option<CollectionRow>, PersistenceError> {
        Ok(collections::table
            .filter(collections::collection_key.eq(collection.key()))
            .select(CollectionRow::as_select())
            .first::<CollectionRow>(&mut self.conn)
            .optional()?)
    }
}

impl RecordStore for SqliteStore {
    fn read_payload(&mut self, collection: Collection) -> Result<Option<String>, PersistenceError> {
        Ok(self.find_row(collection)?.map(|row: CollectionRow| row.payload))
    }

    fn write_payload(
        &mut self,
        collection: Collection,
        payload: String,
    ) -> Result<(), PersistenceError> {
        let updated_at: String = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        diesel::replace_into(collections::table)
            .values(&NewCollectionRow {
                collection_key: collection.key(),
                payload: &payload,
                updated_at: &updated_at,
            })
            .execute(&mut self.conn)?;
        Ok(())
    }
}
