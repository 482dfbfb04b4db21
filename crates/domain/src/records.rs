// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persisted records.
//!
//! Records never hold live references to each other. Links are copied
//! identifiers plus name snapshots taken at write time, so historical orders
//! keep displaying the client and item names they were booked with.
//!
//! Optional fields default when absent from stored JSON:
//! - `Item::quantity_maintenance` defaults to 0
//! - list fields (`photos`, galleries) default to empty
//! - monetary fields other than line values default to zero

use crate::types::{
    ClientStatus, DateRange, ItemCategory, ItemCondition, ItemLocation, Money, OrderStatus,
    PartyType, PaymentMethod, UserRole, iso_date,
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A rentable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque unique identifier.
    pub id: String,
    /// Human-facing sequential code (e.g. `CAD-007`).
    pub code: String,
    pub name: String,
    pub category: ItemCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Units owned.
    pub quantity_total: u32,
    /// Units withdrawn from the rentable pool. Never exceeds `quantity_total`.
    #[serde(default)]
    pub quantity_maintenance: u32,
    #[serde(default)]
    pub location: ItemLocation,
    #[serde(default)]
    pub condition: ItemCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_description: Option<String>,
    pub rental_value: Money,
    pub replacement_value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Item {
    /// Units owned minus units in maintenance.
    #[must_use]
    pub const fn rentable_quantity(&self) -> u32 {
        self.quantity_total.saturating_sub(self.quantity_maintenance)
    }

    /// Returns whether the item is damaged and therefore not bookable.
    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.condition == ItemCondition::Damaged
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: String,
    /// Item code at booking time.
    #[serde(default)]
    pub item_code: String,
    /// Item name at booking time.
    pub item_name: String,
    /// Units booked. Always positive.
    pub quantity: u32,
    pub unit_value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_value: Option<Money>,
    /// `quantity * unit_value`.
    pub total_value: Money,
}

/// A rental order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Human-facing sequential code (e.g. `PED-012`).
    pub code: String,
    pub client_id: String,
    /// Client name at booking time.
    pub client_name: String,
    pub party_type: PartyType,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_time: Option<String>,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub assembly_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_time: Option<String>,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub disassembly_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disassembly_time: Option<String>,
    pub items: Vec<OrderItem>,
    /// Sum of line totals.
    pub total_value: Money,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub amount_paid: Money,
    #[serde(default)]
    pub amount_pending: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u8>,
    pub status: OrderStatus,
    #[serde(default)]
    pub inspiration_photos: Vec<String>,
    #[serde(default)]
    pub assembly_photos: Vec<String>,
    #[serde(default)]
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Order {
    /// The booked interval, if both boundaries are set and ordered.
    #[must_use]
    pub fn rental_period(&self) -> Option<DateRange> {
        match (self.pickup_date, self.return_date) {
            (Some(pickup), Some(ret)) => DateRange::new(pickup, ret).ok(),
            _ => None,
        }
    }

    /// Returns whether this order currently holds inventory.
    #[must_use]
    pub const fn holds_inventory(&self) -> bool {
        self.status.is_active()
    }

    /// Units of the given item booked across all lines of this order.
    #[must_use]
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.items
            .iter()
            .filter(|line| line.item_id == item_id)
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Returns whether any line books the given item.
    #[must_use]
    pub fn references_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|line| line.item_id == item_id)
    }
}

/// A rental client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub full_name: String,
    /// Unique across clients, compared by digits only.
    pub cpf: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Date>,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Derived from order history by collaborators. Not authoritative.
    #[serde(default)]
    pub total_spent: Money,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// An equipment supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cpf_cnpj: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub products_supplied: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A system user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique across users, compared case-insensitively.
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    /// Credential material. Opaque outside the credential layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Returns a copy with credential material removed.
    #[must_use]
    pub fn without_credentials(&self) -> Self {
        Self {
            password_hash: None,
            ..self.clone()
        }
    }
}
