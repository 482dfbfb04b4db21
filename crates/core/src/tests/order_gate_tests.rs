// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    apply_ok, create_rental_state, create_test_context, expect_order, order_draft,
};
use crate::{Command, CoreError, OrderLineDraft, OrderPatch, State, apply};
use partyrent_domain::{
    DateRange, DomainError, Money, OrderStatus, availability_for, parse_date,
};

fn query(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

/// State with order `order-1` holding 4 units for 2024-01-01..=2024-01-03.
fn create_booked_state() -> State {
    let state: State = create_rental_state();
    apply_ok(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::ConfirmedPaid,
            "2024-01-01",
            "2024-01-03",
            &[("item-1", 4)],
        )),
        "order-1",
    )
    .new_state
}

#[test]
fn test_confirmed_order_commits_stock() {
    let state: State = create_booked_state();

    assert_eq!(
        availability_for(
            &state.items,
            &state.orders,
            "item-1",
            &query("2024-01-02", "2024-01-02")
        ),
        6
    );
    assert_eq!(
        availability_for(
            &state.items,
            &state.orders,
            "item-1",
            &query("2024-01-05", "2024-01-06")
        ),
        10
    );
}

#[test]
fn test_overbooking_is_rejected_naming_available_quantity() {
    let state: State = create_booked_state();
    let command = Command::CreateOrder(order_draft(
        OrderStatus::ConfirmedPaid,
        "2024-01-02",
        "2024-01-04",
        &[("item-1", 7)],
    ));

    let result = apply(&state, command, &create_test_context("order-2"));

    match result {
        Err(CoreError::DomainViolation(DomainError::InsufficientStock {
            item_name,
            available,
            requested,
        })) => {
            assert_eq!(item_name, "Mesa Provençal");
            assert_eq!(available, 6);
            assert_eq!(requested, 7);
        }
        other => panic!("expected insufficient stock, got {other:?}"),
    }
}

#[test]
fn test_booking_exactly_the_free_quantity_succeeds() {
    let state: State = create_booked_state();
    let result = apply_ok(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::Delivered,
            "2024-01-02",
            "2024-01-04",
            &[("item-1", 6)],
        )),
        "order-2",
    );

    assert_eq!(
        availability_for(
            &result.new_state.items,
            &result.new_state.orders,
            "item-1",
            &query("2024-01-02", "2024-01-02")
        ),
        0
    );
}

#[test]
fn test_quote_is_not_gated() {
    let state: State = create_booked_state();
    let result = apply_ok(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::Quote,
            "2024-01-02",
            "2024-01-04",
            &[("item-1", 50)],
        )),
        "order-2",
    );
    assert_eq!(expect_order(&result).code, "PED-002");
}

#[test]
fn test_activating_a_quote_is_gated() {
    let state: State = create_booked_state();
    let state: State = apply_ok(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::Quote,
            "2024-01-02",
            "2024-01-04",
            &[("item-1", 7)],
        )),
        "order-2",
    )
    .new_state;

    let patch = OrderPatch {
        status: Some(OrderStatus::ConfirmedPaid),
        ..OrderPatch::default()
    };
    let result = apply(
        &state,
        Command::UpdateOrder {
            id: String::from("order-2"),
            patch,
        },
        &create_test_context("unused"),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InsufficientStock {
            available: 6,
            ..
        }))
    ));
}

#[test]
fn test_active_order_is_not_its_own_competitor() {
    let state: State = create_rental_state();
    let state: State = apply_ok(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::ConfirmedPaid,
            "2024-01-01",
            "2024-01-03",
            &[("item-1", 10)],
        )),
        "order-1",
    )
    .new_state;

    let patch = OrderPatch {
        return_date: Some(parse_date("2024-01-05").unwrap()),
        ..OrderPatch::default()
    };
    let result = apply_ok(
        &state,
        Command::UpdateOrder {
            id: String::from("order-1"),
            patch,
        },
        "unused",
    );

    let order = expect_order(&result);
    assert_eq!(order.return_date, Some(parse_date("2024-01-05").unwrap()));
}

#[test]
fn test_growing_an_active_order_is_gated() {
    let state: State = create_booked_state();
    let state: State = apply_ok(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::ConfirmedPaid,
            "2024-01-03",
            "2024-01-04",
            &[("item-1", 5)],
        )),
        "order-2",
    )
    .new_state;

    let patch = OrderPatch {
        items: Some(vec![OrderLineDraft {
            item_id: String::from("item-1"),
            quantity: 6,
            unit_value: None,
        }]),
        ..OrderPatch::default()
    };
    let result = apply(
        &state,
        Command::UpdateOrder {
            id: String::from("order-1"),
            patch,
        },
        &create_test_context("unused"),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InsufficientStock {
            available: 5,
            requested: 6,
            ..
        }))
    ));
}

#[test]
fn test_non_commitment_edit_of_active_order_skips_gate() {
    let state: State = create_booked_state();
    // Shrink the catalog below what order-1 already holds.
    let state: State = apply_ok(
        &state,
        Command::AdjustItemQuantity {
            id: String::from("item-1"),
            delta: -8,
        },
        "unused",
    )
    .new_state;

    let patch = OrderPatch {
        amount_paid: Some(Money::from_cents(1000)),
        ..OrderPatch::default()
    };
    let result = apply_ok(
        &state,
        Command::UpdateOrder {
            id: String::from("order-1"),
            patch,
        },
        "unused",
    );
    assert_eq!(expect_order(&result).amount_paid, Money::from_cents(1000));
}

#[test]
fn test_active_order_requires_dates() {
    let state: State = create_rental_state();
    let mut draft = order_draft(
        OrderStatus::ConfirmedPaid,
        "2024-01-01",
        "2024-01-03",
        &[("item-1", 1)],
    );
    draft.return_date = None;

    let result = apply(
        &state,
        Command::CreateOrder(draft),
        &create_test_context("order-1"),
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::MissingRentalDates)
    );
}

#[test]
fn test_order_requires_client_and_payment_method() {
    let state: State = create_rental_state();

    let mut draft = order_draft(OrderStatus::Quote, "2024-01-01", "2024-01-03", &[]);
    draft.client_id = String::new();
    let result = apply(
        &state,
        Command::CreateOrder(draft),
        &create_test_context("order-1"),
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::MissingClient)
    );

    let mut draft = order_draft(OrderStatus::Quote, "2024-01-01", "2024-01-03", &[]);
    draft.payment_method = None;
    let result = apply(
        &state,
        Command::CreateOrder(draft),
        &create_test_context("order-1"),
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::MissingPaymentMethod)
    );
}

#[test]
fn test_reversed_dates_are_rejected() {
    let state: State = create_rental_state();
    let result = apply(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::Quote,
            "2024-01-05",
            "2024-01-01",
            &[("item-1", 1)],
        )),
        &create_test_context("order-1"),
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidDateRange { .. }))
    ));
}

#[test]
fn test_duplicate_lines_are_gated_together() {
    let state: State = create_booked_state();
    let result = apply(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::ConfirmedPaid,
            "2024-01-02",
            "2024-01-02",
            &[("item-1", 4), ("item-1", 3)],
        )),
        &create_test_context("order-2"),
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InsufficientStock {
            available: 6,
            requested: 7,
            ..
        }))
    ));
}

#[test]
fn test_order_snapshots_names_and_totals() {
    let state: State = create_rental_state();
    let result = apply_ok(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::Quote,
            "2024-01-01",
            "2024-01-03",
            &[("item-1", 3)],
        )),
        "order-1",
    );
    let order = expect_order(&result);

    assert_eq!(order.code, "PED-001");
    assert_eq!(order.client_name, "Maria Silva");
    assert_eq!(order.items[0].item_name, "Mesa Provençal");
    assert_eq!(order.items[0].item_code, "CAD-001");
    assert_eq!(order.items[0].total_value, Money::from_cents(15000));
    assert_eq!(order.total_value, Money::from_cents(15000));
    assert_eq!(order.amount_pending, Money::from_cents(15000));
    assert_eq!(order.created_by, "Admin");
}

#[test]
fn test_deleting_an_order_releases_its_hold() {
    let state: State = create_booked_state();
    let result = apply_ok(
        &state,
        Command::DeleteOrder {
            id: String::from("order-1"),
        },
        "unused",
    );

    assert_eq!(
        availability_for(
            &result.new_state.items,
            &result.new_state.orders,
            "item-1",
            &query("2024-01-02", "2024-01-02")
        ),
        10
    );
}

#[test]
fn test_deleting_unknown_order_is_not_found() {
    let state: State = create_rental_state();
    let result = apply(
        &state,
        Command::DeleteOrder {
            id: String::from("missing"),
        },
        &create_test_context("unused"),
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::OrderNotFound(String::from("missing")))
    );
}

#[test]
fn test_failed_gate_leaves_state_unchanged() {
    let state: State = create_booked_state();
    let before: State = state.clone();
    let _ = apply(
        &state,
        Command::CreateOrder(order_draft(
            OrderStatus::ConfirmedPaid,
            "2024-01-02",
            "2024-01-04",
            &[("item-1", 7)],
        )),
        &create_test_context("order-2"),
    );
    assert_eq!(state, before);
    assert_eq!(state.orders.len(), 1);
}
