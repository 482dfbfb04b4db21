// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent::ChangedCollection;

/// A logical collection of homogeneous records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Clients,
    Items,
    Orders,
    Suppliers,
    AuditLog,
    Users,
}

impl Collection {
    /// Every collection, in a stable order.
    pub const ALL: [Self; 6] = [
        Self::Clients,
        Self::Items,
        Self::Orders,
        Self::Suppliers,
        Self::AuditLog,
        Self::Users,
    ];

    /// The key the collection is stored under locally.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Clients => "partyrent_clients",
            Self::Items => "partyrent_items",
            Self::Orders => "partyrent_orders",
            Self::Suppliers => "partyrent_suppliers",
            Self::AuditLog => "partyrent_audit_logs",
            Self::Users => "partyrent_users_db",
        }
    }

    /// The collection name on the remote mirror.
    #[must_use]
    pub const fn mirror_name(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Items => "items",
            Self::Orders => "orders",
            Self::Suppliers => "suppliers",
            Self::AuditLog => "audit_logs",
            Self::Users => "users",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl From<ChangedCollection> for Collection {
    fn from(changed: ChangedCollection) -> Self {
        match changed {
            ChangedCollection::Items => Self::Items,
            ChangedCollection::Orders => Self::Orders,
            ChangedCollection::Clients => Self::Clients,
            ChangedCollection::Suppliers => Self::Suppliers,
            ChangedCollection::Users => Self::Users,
        }
    }
}
