// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order construction and the availability gate.
//!
//! The gate runs whenever a write leaves an order in an active status and
//! either the order was not active before or its lines or dates changed.
//! Re-validation ignores the order's own stored hold, so an order never
//! competes with itself.

use crate::command::{OrderDraft, OrderLineDraft, OrderPatch};
use crate::state::State;
use partyrent_domain::{
    DateRange, DomainError, Money, Order, OrderItem, calculate_availability, validate_order_lines,
};
use time::OffsetDateTime;

/// Builds snapshotted order lines from requested lines.
///
/// # Errors
///
/// Returns an error if a line names an unknown item or books zero units.
pub(crate) fn build_lines(
    state: &State,
    requested: &[OrderLineDraft],
) -> Result<Vec<OrderItem>, DomainError> {
    let lines: Vec<OrderItem> = requested
        .iter()
        .map(|line| -> Result<OrderItem, DomainError> {
            let item = state
                .item(&line.item_id)
                .ok_or_else(|| DomainError::ItemNotFound(line.item_id.clone()))?;
            let unit_value: Money = line.unit_value.unwrap_or(item.rental_value);
            Ok(OrderItem {
                item_id: item.id.clone(),
                item_code: item.code.clone(),
                item_name: item.name.clone(),
                quantity: line.quantity,
                unit_value,
                replacement_value: Some(item.replacement_value),
                total_value: unit_value.times(line.quantity),
            })
        })
        .collect::<Result<_, _>>()?;

    validate_order_lines(&lines)?;
    Ok(lines)
}

/// Looks up the client an order is for and returns its name snapshot.
fn client_name(state: &State, client_id: &str) -> Result<String, DomainError> {
    if client_id.trim().is_empty() {
        return Err(DomainError::MissingClient);
    }
    state
        .client(client_id)
        .map(|client| client.full_name.clone())
        .ok_or_else(|| DomainError::ClientNotFound(client_id.to_string()))
}

/// Recomputes the order total and the pending amount from its lines.
fn recompute_totals(order: &mut Order) {
    order.total_value = order.items.iter().map(|line| line.total_value).sum();
    let pending: i64 = order.total_value.cents() - order.amount_paid.cents();
    order.amount_pending = Money::from_cents(pending.max(0));
}

/// Checks pickup and return dates are ordered when both are present.
fn validate_dates(order: &Order) -> Result<(), DomainError> {
    if let (Some(pickup), Some(ret)) = (order.pickup_date, order.return_date) {
        DateRange::new(pickup, ret)?;
    }
    Ok(())
}

/// Builds a new order from a draft.
///
/// # Errors
///
/// Returns an error if the client or payment method is missing, a line is
/// invalid, or the dates are reversed.
pub(crate) fn build_order(
    state: &State,
    draft: OrderDraft,
    id: String,
    code: String,
    created_by: String,
    now: OffsetDateTime,
) -> Result<Order, DomainError> {
    let client_name: String = client_name(state, &draft.client_id)?;
    let payment_method = draft
        .payment_method
        .ok_or(DomainError::MissingPaymentMethod)?;
    if draft.amount_paid.is_negative() {
        return Err(DomainError::NegativeAmount {
            field: "amount_paid",
        });
    }
    let items: Vec<OrderItem> = build_lines(state, &draft.items)?;

    let mut order = Order {
        id,
        code,
        client_id: draft.client_id,
        client_name,
        party_type: draft.party_type,
        pickup_date: draft.pickup_date,
        pickup_time: draft.pickup_time,
        return_date: draft.return_date,
        return_time: draft.return_time,
        assembly_date: draft.assembly_date,
        assembly_time: draft.assembly_time,
        disassembly_date: draft.disassembly_date,
        disassembly_time: draft.disassembly_time,
        items,
        total_value: Money::ZERO,
        payment_method,
        amount_paid: draft.amount_paid,
        amount_pending: Money::ZERO,
        installments: draft.installments,
        status: draft.status,
        inspiration_photos: draft.inspiration_photos,
        assembly_photos: draft.assembly_photos,
        created_by,
        created_at: now,
        updated_at: now,
    };
    recompute_totals(&mut order);
    validate_dates(&order)?;
    Ok(order)
}

/// Applies a patch to a stored order.
///
/// # Errors
///
/// Returns an error if a changed client or line is invalid, or the
/// resulting dates are reversed.
pub(crate) fn patch_order(
    state: &State,
    current: &Order,
    patch: OrderPatch,
    now: OffsetDateTime,
) -> Result<Order, DomainError> {
    let mut order: Order = current.clone();

    if let Some(client_id) = patch.client_id
        && client_id != order.client_id
    {
        order.client_name = client_name(state, &client_id)?;
        order.client_id = client_id;
    }
    if let Some(party_type) = patch.party_type {
        order.party_type = party_type;
    }
    if patch.pickup_date.is_some() {
        order.pickup_date = patch.pickup_date;
    }
    if patch.pickup_time.is_some() {
        order.pickup_time = patch.pickup_time;
    }
    if patch.return_date.is_some() {
        order.return_date = patch.return_date;
    }
    if patch.return_time.is_some() {
        order.return_time = patch.return_time;
    }
    if patch.assembly_date.is_some() {
        order.assembly_date = patch.assembly_date;
    }
    if patch.assembly_time.is_some() {
        order.assembly_time = patch.assembly_time;
    }
    if patch.disassembly_date.is_some() {
        order.disassembly_date = patch.disassembly_date;
    }
    if patch.disassembly_time.is_some() {
        order.disassembly_time = patch.disassembly_time;
    }
    if let Some(lines) = patch.items {
        order.items = build_lines(state, &lines)?;
    }
    if let Some(payment_method) = patch.payment_method {
        order.payment_method = payment_method;
    }
    if let Some(amount_paid) = patch.amount_paid {
        if amount_paid.is_negative() {
            return Err(DomainError::NegativeAmount {
                field: "amount_paid",
            });
        }
        order.amount_paid = amount_paid;
    }
    if patch.installments.is_some() {
        order.installments = patch.installments;
    }
    if let Some(status) = patch.status {
        order.status = status;
    }
    if let Some(photos) = patch.inspiration_photos {
        order.inspiration_photos = photos;
    }
    if let Some(photos) = patch.assembly_photos {
        order.assembly_photos = photos;
    }

    order.updated_at = now;
    recompute_totals(&mut order);
    validate_dates(&order)?;
    Ok(order)
}

/// Returns whether two orders book the same units on the same days.
fn same_commitment(a: &Order, b: &Order) -> bool {
    let lines = |order: &Order| -> Vec<(String, u32)> {
        order
            .items
            .iter()
            .map(|line| (line.item_id.clone(), line.quantity))
            .collect()
    };
    a.pickup_date == b.pickup_date && a.return_date == b.return_date && lines(a) == lines(b)
}

/// Returns whether writing `candidate` over `previous` must pass the gate.
#[must_use]
pub(crate) fn requires_gate(previous: Option<&Order>, candidate: &Order) -> bool {
    if !candidate.holds_inventory() {
        return false;
    }
    match previous {
        None => true,
        Some(previous) => !previous.holds_inventory() || !same_commitment(previous, candidate),
    }
}

/// Rejects an active order that books more than is free.
///
/// Every distinct item is checked once against the summed quantity of all
/// its lines. The order's own stored hold, if any, is excluded from the
/// scan.
///
/// # Errors
///
/// Returns `DomainError::MissingRentalDates` if a date is absent, or
/// `DomainError::InsufficientStock` naming the first short item.
pub(crate) fn enforce_availability(state: &State, candidate: &Order) -> Result<(), DomainError> {
    let (Some(pickup), Some(ret)) = (candidate.pickup_date, candidate.return_date) else {
        return Err(DomainError::MissingRentalDates);
    };
    let period: DateRange = DateRange::new(pickup, ret)?;

    let mut checked: Vec<&str> = Vec::new();
    for line in &candidate.items {
        if checked.contains(&line.item_id.as_str()) {
            continue;
        }
        checked.push(&line.item_id);

        let item = state
            .item(&line.item_id)
            .ok_or_else(|| DomainError::ItemNotFound(line.item_id.clone()))?;
        let requested: u32 = candidate.quantity_of(&line.item_id);
        let available: u32 =
            calculate_availability(item, &state.orders, &period, Some(&candidate.id)).available;

        if requested > available {
            return Err(DomainError::InsufficientStock {
                item_name: line.item_name.clone(),
                available,
                requested,
            });
        }
    }

    Ok(())
}
