// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operational alerts for notification pollers.
//!
//! Alerts are derived on demand from the current items and orders. Nothing
//! about them is stored.

use crate::records::{Item, Order};
use crate::types::{format_date, iso_date};
use serde::{Deserialize, Serialize};
use time::Date;

/// The kind of an operational alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    /// At most a fifth of an item's owned units are outside maintenance.
    LowStock,
    /// An active order's return date has passed.
    LateReturn,
    /// An active order is due back today.
    ReturnToday,
}

/// A single operational alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable identifier, e.g. `late-<order id>`.
    pub id: String,
    pub kind: AlertKind,
    /// The item or order the alert is about.
    pub entity_id: String,
    pub message: String,
    /// The day the alert refers to. Used for newest-first ordering.
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// Returns whether an item's rentable share is at or below 20%.
///
/// Items with no owned units never raise this alert.
#[must_use]
pub fn is_low_stock(item: &Item) -> bool {
    item.quantity_total > 0
        && u64::from(item.rentable_quantity()) * 5 <= u64::from(item.quantity_total)
}

/// Computes the current alerts, newest first.
#[must_use]
pub fn compute_alerts(items: &[Item], orders: &[Order], today: Date) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = items
        .iter()
        .filter(|item| is_low_stock(item))
        .map(|item| Alert {
            id: format!("stock-{}", item.id),
            kind: AlertKind::LowStock,
            entity_id: item.id.clone(),
            message: format!(
                "Item '{}' has only {} unit(s) available",
                item.name,
                item.rentable_quantity()
            ),
            date: today,
        })
        .collect();

    for order in orders.iter().filter(|order| order.holds_inventory()) {
        let Some(return_date) = order.return_date else {
            continue;
        };

        if return_date < today {
            alerts.push(Alert {
                id: format!("late-{}", order.id),
                kind: AlertKind::LateReturn,
                entity_id: order.id.clone(),
                message: format!(
                    "Order {} (client: {}) was due back on {}",
                    order.code,
                    order.client_name,
                    format_date(return_date)
                ),
                date: return_date,
            });
        } else if return_date == today {
            alerts.push(Alert {
                id: format!("today-{}", order.id),
                kind: AlertKind::ReturnToday,
                entity_id: order.id.clone(),
                message: format!("Order {} is due back today", order.code),
                date: return_date,
            });
        }
    }

    alerts.sort_by(|a, b| b.date.cmp(&a.date));
    alerts
}
