// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::cargo_common_metadata)]

use partyrent_domain::UserRole;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// The user performing an action.
///
/// The actor is used only to stamp audit entries. It is not authenticated
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user's identifier.
    pub id: String,
    /// The user's display name at the time of the action.
    pub name: String,
    /// The user's role.
    pub role: UserRole,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The user's identifier
    /// * `name` - The user's display name
    /// * `role` - The user's role
    #[must_use]
    pub const fn new(id: String, name: String, role: UserRole) -> Self {
        Self { id, name, role }
    }

    /// Returns whether the actor has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// The kind of mutation recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    /// A whole collection was cleared.
    DeleteAll,
}

impl AuditAction {
    /// Converts this action to its wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::DeleteAll => "DELETE_ALL",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of entity an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Client,
    Item,
    Order,
    Supplier,
    User,
}

impl EntityType {
    /// Converts this entity type to its wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Item => "ITEM",
            Self::Order => "ORDER",
            Self::Supplier => "SUPPLIER",
            Self::User => "USER",
        }
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CLIENT" => Ok(Self::Client),
            "ITEM" => Ok(Self::Item),
            "ORDER" => Ok(Self::Order),
            "SUPPLIER" => Ok(Self::Supplier),
            "USER" => Ok(Self::User),
            _ => Err(format!("Unknown entity type: {s}")),
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What changed in an audited mutation.
///
/// Serialized untagged, so a diff is an `{ "old": .., "new": .. }` object,
/// a snapshot is the record itself and a note is a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Changes {
    /// Before and after images of an updated record.
    Diff {
        /// The record before the update.
        old: Value,
        /// The record after the update.
        new: Value,
    },
    /// A free-form description, used for bulk operations.
    Note(String),
    /// The created or deleted record.
    Snapshot(Value),
}

impl Changes {
    /// Builds a snapshot from any serializable record.
    ///
    /// A record that cannot be represented as JSON is recorded as `null`.
    #[must_use]
    pub fn snapshot<T: Serialize>(record: &T) -> Self {
        Self::Snapshot(serde_json::to_value(record).unwrap_or(Value::Null))
    }

    /// Builds a diff from the before and after images of a record.
    #[must_use]
    pub fn diff<T: Serialize>(old: &T, new: &T) -> Self {
        Self::Diff {
            old: serde_json::to_value(old).unwrap_or(Value::Null),
            new: serde_json::to_value(new).unwrap_or(Value::Null),
        }
    }
}

/// An immutable, append-only audit log entry.
///
/// Entries are for display and forensics only. Business rules never read
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Opaque unique identifier.
    pub id: String,
    /// The acting user's identifier.
    pub user_id: String,
    /// The acting user's name at the time of the action.
    pub user_name: String,
    pub action: AuditAction,
    pub entity_type: EntityType,
    /// The affected record, or `ALL` for bulk operations.
    pub entity_id: String,
    pub changes: Changes,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Entity id recorded for bulk operations.
pub const ALL_ENTITIES: &str = "ALL";

impl AuditEntry {
    /// Creates a new `AuditEntry` stamped with the actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The entry's identifier
    /// * `actor` - The user who performed the action
    /// * `action` - The kind of mutation
    /// * `entity_type` - The kind of entity affected
    /// * `entity_id` - The affected record
    /// * `changes` - What changed
    /// * `created_at` - When the action happened
    #[must_use]
    pub fn new(
        id: String,
        actor: &Actor,
        action: AuditAction,
        entity_type: EntityType,
        entity_id: String,
        changes: Changes,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            user_id: actor.id.clone(),
            user_name: actor.name.clone(),
            action,
            entity_type,
            entity_id,
            changes,
            created_at,
        }
    }

    /// Returns whether this entry refers to the given entity.
    #[must_use]
    pub fn concerns(&self, entity_type: EntityType, entity_id: &str) -> bool {
        self.entity_type == entity_type && self.entity_id == entity_id
    }
}
