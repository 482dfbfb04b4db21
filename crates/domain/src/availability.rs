// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Item availability calculation.
//!
//! Availability is never stored. It is recomputed from scratch on every call
//! by scanning the orders that currently hold inventory, so removing or
//! deactivating an order releases its units immediately.
//!
//! For an item and a closed interval `[start, end]`:
//! - A missing item has zero availability
//! - A damaged item has zero availability regardless of quantities
//! - Otherwise availability is
//!   `max(0, quantity_total - committed - quantity_maintenance)`, where
//!   `committed` sums the units booked by active orders whose rental period
//!   overlaps the interval
//!
//! Orders without both a pickup and a return date never overlap anything.

use crate::records::{Item, Order};
use crate::types::DateRange;
use serde::{Deserialize, Serialize};

/// Breakdown of an availability calculation for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// Units owned.
    pub quantity_total: u32,
    /// Units withdrawn for maintenance.
    pub quantity_maintenance: u32,
    /// Units held by overlapping active orders.
    pub quantity_committed: u32,
    /// Units free for booking in the interval.
    pub available: u32,
    /// Whether the item is damaged (forces `available` to 0).
    pub damaged: bool,
}

/// Sums the units of an item held by active orders overlapping `range`.
///
/// # Arguments
///
/// * `item_id` - The item to count
/// * `orders` - All stored orders
/// * `range` - The query interval
/// * `exclude_order` - An order whose own hold is ignored
#[must_use]
pub fn committed_quantity(
    item_id: &str,
    orders: &[Order],
    range: &DateRange,
    exclude_order: Option<&str>,
) -> u32 {
    orders
        .iter()
        .filter(|order| Some(order.id.as_str()) != exclude_order)
        .filter(|order| order.holds_inventory())
        .filter(|order| {
            order
                .rental_period()
                .is_some_and(|period| period.overlaps(range))
        })
        .fold(0_u32, |acc, order| {
            acc.saturating_add(order.quantity_of(item_id))
        })
}

/// Calculates the availability breakdown of an item for an interval.
///
/// # Arguments
///
/// * `item` - The item
/// * `orders` - All stored orders
/// * `range` - The query interval
/// * `exclude_order` - An order whose own hold is ignored, used when an
///   already-active order is re-validated after a change
#[must_use]
pub fn calculate_availability(
    item: &Item,
    orders: &[Order],
    range: &DateRange,
    exclude_order: Option<&str>,
) -> AvailabilityResult {
    let quantity_committed: u32 = committed_quantity(&item.id, orders, range, exclude_order);
    let damaged: bool = item.is_damaged();

    let available: u32 = if damaged {
        0
    } else {
        item.quantity_total
            .saturating_sub(quantity_committed)
            .saturating_sub(item.quantity_maintenance)
    };

    AvailabilityResult {
        quantity_total: item.quantity_total,
        quantity_maintenance: item.quantity_maintenance,
        quantity_committed,
        available,
        damaged,
    }
}

/// Units of the item with the given id free for booking in `range`.
///
/// Returns 0 if the item does not exist.
#[must_use]
pub fn availability_for(items: &[Item], orders: &[Order], item_id: &str, range: &DateRange) -> u32 {
    items
        .iter()
        .find(|item| item.id == item_id)
        .map_or(0, |item| {
            calculate_availability(item, orders, range, None).available
        })
}

/// Items with at least one unit free in `range`, in catalog order.
#[must_use]
pub fn list_available<'a>(items: &'a [Item], orders: &[Order], range: &DateRange) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| calculate_availability(item, orders, range, None).available > 0)
        .collect()
}
