// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent_domain::{
    ClientStatus, ItemCategory, ItemCondition, ItemLocation, Money, OrderStatus, PartyType,
    PaymentMethod, UserRole, iso_date,
};
use serde::Deserialize;
use time::Date;

/// Fields of a new catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity_total: u32,
    #[serde(default)]
    pub quantity_maintenance: u32,
    #[serde(default)]
    pub location: ItemLocation,
    #[serde(default)]
    pub condition: ItemCondition,
    #[serde(default)]
    pub damage_description: Option<String>,
    pub rental_value: Money,
    pub replacement_value: Money,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
}

/// A partial item update. Absent fields are left unchanged.
///
/// An empty string clears an optional text field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<ItemCategory>,
    pub description: Option<String>,
    pub quantity_total: Option<u32>,
    pub quantity_maintenance: Option<u32>,
    pub location: Option<ItemLocation>,
    pub condition: Option<ItemCondition>,
    pub damage_description: Option<String>,
    pub rental_value: Option<Money>,
    pub replacement_value: Option<Money>,
    pub dimensions: Option<String>,
    pub material: Option<String>,
    pub photos: Option<Vec<String>>,
    pub supplier_id: Option<String>,
}

/// One requested order line.
///
/// Names and codes are snapshotted from the catalog when the order is
/// written. The unit value defaults to the item's rental value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderLineDraft {
    pub item_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit_value: Option<Money>,
}

/// Fields of a new order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub client_id: String,
    pub party_type: PartyType,
    #[serde(default, with = "iso_date::option")]
    pub pickup_date: Option<Date>,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub return_date: Option<Date>,
    #[serde(default)]
    pub return_time: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub assembly_date: Option<Date>,
    #[serde(default)]
    pub assembly_time: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub disassembly_date: Option<Date>,
    #[serde(default)]
    pub disassembly_time: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLineDraft>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub amount_paid: Money,
    #[serde(default)]
    pub installments: Option<u8>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub inspiration_photos: Vec<String>,
    #[serde(default)]
    pub assembly_photos: Vec<String>,
}

/// A partial order update. Absent fields are left unchanged.
///
/// Any status may be written; only the availability gate is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderPatch {
    pub client_id: Option<String>,
    pub party_type: Option<PartyType>,
    #[serde(with = "iso_date::option")]
    pub pickup_date: Option<Date>,
    pub pickup_time: Option<String>,
    #[serde(with = "iso_date::option")]
    pub return_date: Option<Date>,
    pub return_time: Option<String>,
    #[serde(with = "iso_date::option")]
    pub assembly_date: Option<Date>,
    pub assembly_time: Option<String>,
    #[serde(with = "iso_date::option")]
    pub disassembly_date: Option<Date>,
    pub disassembly_time: Option<String>,
    pub items: Option<Vec<OrderLineDraft>>,
    pub payment_method: Option<PaymentMethod>,
    pub amount_paid: Option<Money>,
    pub installments: Option<u8>,
    pub status: Option<OrderStatus>,
    pub inspiration_photos: Option<Vec<String>>,
    pub assembly_photos: Option<Vec<String>>,
}

/// Fields of a new client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientDraft {
    pub full_name: String,
    pub cpf: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default, with = "iso_date::option")]
    pub birth_date: Option<Date>,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A partial client update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientPatch {
    pub full_name: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(with = "iso_date::option")]
    pub birth_date: Option<Date>,
    pub status: Option<ClientStatus>,
    pub notes: Option<String>,
}

/// Fields of a new supplier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupplierDraft {
    pub name: String,
    #[serde(default)]
    pub cpf_cnpj: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub products_supplied: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Fields of a new user. The password is hashed before it reaches a command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

/// A partial user update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add an item to the catalog.
    CreateItem(ItemDraft),
    /// Partially update a catalog item.
    UpdateItem {
        /// The item to update.
        id: String,
        /// The fields to change.
        patch: ItemPatch,
    },
    /// Add or remove owned units.
    AdjustItemQuantity {
        /// The item to adjust.
        id: String,
        /// Signed number of units.
        delta: i64,
    },
    /// Remove an item that no active order references.
    DeleteItem {
        /// The item to delete.
        id: String,
    },
    /// Create an order, gated by availability when it starts active.
    CreateOrder(OrderDraft),
    /// Partially update an order, re-gated when it could commit more stock.
    UpdateOrder {
        /// The order to update.
        id: String,
        /// The fields to change.
        patch: OrderPatch,
    },
    /// Delete an order, releasing any stock it held.
    DeleteOrder {
        /// The order to delete.
        id: String,
    },
    /// Register a client.
    CreateClient(ClientDraft),
    /// Partially update a client.
    UpdateClient {
        /// The client to update.
        id: String,
        /// The fields to change.
        patch: ClientPatch,
    },
    /// Delete a client.
    DeleteClient {
        /// The client to delete.
        id: String,
    },
    /// Register a supplier.
    CreateSupplier(SupplierDraft),
    /// Delete a supplier.
    DeleteSupplier {
        /// The supplier to delete.
        id: String,
    },
    /// Create a user with an already hashed password.
    CreateUser {
        /// The user's fields.
        draft: UserDraft,
        /// The password hash.
        password_hash: String,
    },
    /// Partially update a user.
    UpdateUser {
        /// The user to update.
        id: String,
        /// The fields to change.
        patch: UserPatch,
    },
    /// Delete a user other than the actor.
    DeleteUser {
        /// The user to delete.
        id: String,
    },
    /// Replace a user's own password after it was verified.
    ChangePassword {
        /// The user whose password changes.
        id: String,
        /// The new password hash.
        password_hash: String,
    },
    /// Replace any user's password. Admin only.
    ResetPassword {
        /// The user whose password is reset.
        id: String,
        /// The new password hash.
        password_hash: String,
    },
    /// Remove every catalog item.
    ClearCatalog,
    /// Remove every order.
    ClearOrders,
}
