// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The local store has no room left for the write.
    StorageFull(String),
    /// Any other local storage failure.
    Storage(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Serialization/deserialization error.
    Serialization(String),
    /// Stored data that no longer decodes. Writing over it would lose it.
    Corrupt(String),
    /// The remote mirror could not be read or written.
    Mirror(String),
}

impl PersistenceError {
    /// Returns whether the failure was caused by exhausted capacity.
    #[must_use]
    pub const fn is_storage_full(&self) -> bool {
        matches!(self, Self::StorageFull(_))
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageFull(msg) => write!(f, "Storage is full: {msg}"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            Self::Corrupt(msg) => write!(f, "Corrupt stored data: {msg}"),
            Self::Mirror(msg) => write!(f, "Mirror error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        let message: String = err.to_string();
        // SQLITE_FULL surfaces as "database or disk is full"
        if message.contains("is full") {
            Self::StorageFull(message)
        } else {
            Self::Storage(message)
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::StorageFull {
            Self::StorageFull(err.to_string())
        } else {
            Self::Storage(err.to_string())
        }
    }
}
