// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ClientDraft, Command, ItemDraft, OrderDraft, OrderLineDraft, Outcome, State,
    TransitionContext, TransitionResult, apply,
};
use partyrent_audit::Actor;
use partyrent_domain::{
    ClientStatus, ItemCategory, ItemCondition, ItemLocation, Money, OrderStatus, PartyType,
    PaymentMethod, UserRole, parse_date,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(
        String::from("admin-123"),
        String::from("Admin"),
        UserRole::Admin,
    )
}

pub fn create_test_context(new_id: &str) -> TransitionContext {
    TransitionContext {
        actor: create_test_actor(),
        now: test_now(),
        new_id: new_id.to_string(),
        audit_id: format!("audit-{new_id}"),
    }
}

pub const fn test_now() -> OffsetDateTime {
    datetime!(2024-01-01 12:00 UTC)
}

pub fn item_draft(name: &str, total: u32) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        category: ItemCategory::Moveis,
        description: None,
        quantity_total: total,
        quantity_maintenance: 0,
        location: ItemLocation::Stock,
        condition: ItemCondition::Normal,
        damage_description: None,
        rental_value: Money::from_cents(5000),
        replacement_value: Money::from_cents(30000),
        dimensions: None,
        material: None,
        photos: Vec::new(),
        supplier_id: None,
    }
}

pub fn client_draft(name: &str, cpf: &str) -> ClientDraft {
    ClientDraft {
        full_name: name.to_string(),
        cpf: cpf.to_string(),
        phone: String::from("(11) 90000-0000"),
        email: None,
        address: String::new(),
        birth_date: None,
        status: ClientStatus::Active,
        notes: None,
    }
}

pub fn order_draft(
    status: OrderStatus,
    pickup: &str,
    ret: &str,
    lines: &[(&str, u32)],
) -> OrderDraft {
    OrderDraft {
        client_id: String::from("client-1"),
        party_type: PartyType::Pocket,
        pickup_date: Some(parse_date(pickup).unwrap()),
        pickup_time: None,
        return_date: Some(parse_date(ret).unwrap()),
        return_time: None,
        assembly_date: None,
        assembly_time: None,
        disassembly_date: None,
        disassembly_time: None,
        items: lines
            .iter()
            .map(|(item_id, quantity)| OrderLineDraft {
                item_id: (*item_id).to_string(),
                quantity: *quantity,
                unit_value: None,
            })
            .collect(),
        payment_method: Some(PaymentMethod::Pix),
        amount_paid: Money::ZERO,
        installments: None,
        status,
        inspiration_photos: Vec::new(),
        assembly_photos: Vec::new(),
    }
}

/// Applies a command and returns the new state, panicking on failure.
pub fn apply_ok(state: &State, command: Command, new_id: &str) -> TransitionResult {
    apply(state, command, &create_test_context(new_id)).unwrap()
}

/// A state holding client `client-1` and item `item-1` with ten units.
pub fn create_rental_state() -> State {
    let state: State = State::new();
    let state: State = apply_ok(
        &state,
        Command::CreateClient(client_draft("Maria Silva", "529.982.247-25")),
        "client-1",
    )
    .new_state;
    apply_ok(
        &state,
        Command::CreateItem(item_draft("Mesa Provençal", 10)),
        "item-1",
    )
    .new_state
}

pub fn expect_order(result: &TransitionResult) -> &partyrent_domain::Order {
    match &result.outcome {
        Outcome::Order(order) => order,
        other => panic!("expected an order, got {other:?}"),
    }
}
