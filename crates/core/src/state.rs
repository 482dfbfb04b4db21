// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent_audit::{Actor, AuditEntry};
use partyrent_domain::{Client, Item, Order, Supplier, User};
use time::OffsetDateTime;

/// A snapshot of every business collection.
///
/// State is loaded from the record store before a command is applied and
/// only the collection a transition touched is written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// The catalog.
    pub items: Vec<Item>,
    /// All orders, active or not.
    pub orders: Vec<Order>,
    pub clients: Vec<Client>,
    pub suppliers: Vec<Supplier>,
    pub users: Vec<User>,
}

impl State {
    /// Creates an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            orders: Vec::new(),
            clients: Vec::new(),
            suppliers: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Finds an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Finds an order by id.
    #[must_use]
    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Finds a client by id.
    #[must_use]
    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    /// Finds a user by id.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }
}

/// The collection a transition rewrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangedCollection {
    Items,
    Orders,
    Clients,
    Suppliers,
    Users,
}

/// The record a transition produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Item(Item),
    Order(Order),
    Client(Client),
    Supplier(Supplier),
    /// The stored user, credentials included.
    User(User),
    /// A record was removed.
    Deleted {
        /// The removed record's id.
        id: String,
    },
    /// A whole collection was emptied.
    Cleared {
        /// How many records were removed.
        removed: usize,
    },
}

/// Per-call values a transition needs but must not generate itself.
///
/// Keeping identifier and clock sources outside `apply` keeps it
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionContext {
    /// The user performing the action.
    pub actor: Actor,
    /// Wall-clock time of the action.
    pub now: OffsetDateTime,
    /// Identifier for a record created by this transition.
    pub new_id: String,
    /// Identifier for the audit entry.
    pub audit_id: String,
}

/// The result of a successful state transition.
///
/// Transitions either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The collection that must be saved.
    pub changed: ChangedCollection,
    /// The audit entry recording this transition.
    pub audit_entry: AuditEntry,
    /// The affected record.
    pub outcome: Outcome,
}
