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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::cargo_common_metadata)]

mod alerts;
mod availability;
mod codes;
mod error;
mod records;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use alerts::{Alert, AlertKind, compute_alerts, is_low_stock};
pub use availability::{
    AvailabilityResult, availability_for, calculate_availability, committed_quantity,
    list_available,
};
pub use codes::{ITEM_CODE_PREFIX, ORDER_CODE_PREFIX, next_sequential_code};
pub use error::DomainError;
pub use records::{Client, Item, Order, OrderItem, Supplier, User};
pub use types::{
    ClientStatus, DateRange, ItemCategory, ItemCondition, ItemLocation, Money, OrderStatus,
    PartyType, PaymentMethod, UserRole, format_date, iso_date, parse_date,
};
pub use validation::{
    MIN_PASSWORD_LENGTH, adjusted_quantity, digits_only, validate_cnpj, validate_cpf,
    validate_cpf_or_cnpj, validate_cpf_unique, validate_email, validate_email_unique,
    validate_item_fields, validate_name, validate_order_lines, validate_password,
};
