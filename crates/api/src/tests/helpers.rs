// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent::{ClientDraft, ItemDraft, OrderDraft, OrderLineDraft};
use partyrent_audit::Actor;
use partyrent_domain::{
    Client, ClientStatus, Item, ItemCategory, ItemCondition, ItemLocation, Money, OrderStatus,
    PartyType, PaymentMethod, UserRole, parse_date,
};
use partyrent_persistence::{MemoryStore, RecordStore};
use time::Date;
use time::macros::datetime;

use crate::{FixedClock, RentalService};

/// Lowest cost bcrypt accepts. Keeps hashing fast in tests.
pub const TEST_HASH_COST: u32 = 4;

pub fn create_test_actor() -> Actor {
    Actor::new(
        String::from("admin-123"),
        String::from("Admin"),
        UserRole::Admin,
    )
}

pub fn create_operator_actor() -> Actor {
    Actor::new(
        String::from("operator-456"),
        String::from("Operator"),
        UserRole::Operator,
    )
}

pub fn create_test_service() -> RentalService<MemoryStore> {
    create_test_service_with_store(MemoryStore::new())
}

pub fn create_test_service_with_store<S: RecordStore>(store: S) -> RentalService<S> {
    RentalService::new(store)
        .with_clock(FixedClock(datetime!(2024-01-01 12:00 UTC)))
        .with_hash_cost(TEST_HASH_COST)
}

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
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
        phone: String::from("(11) 98765-4321"),
        email: Some(String::from("maria@example.com")),
        address: String::new(),
        birth_date: None,
        status: ClientStatus::Active,
        notes: None,
    }
}

pub fn order_draft(
    client_id: &str,
    status: OrderStatus,
    pickup: &str,
    ret: &str,
    lines: &[(&str, u32)],
) -> OrderDraft {
    OrderDraft {
        client_id: client_id.to_string(),
        party_type: PartyType::Pocket,
        pickup_date: Some(date(pickup)),
        pickup_time: None,
        return_date: Some(date(ret)),
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

/// Seeds one client and one ten-unit item.
pub fn seed_rental<S: RecordStore>(service: &mut RentalService<S>) -> (Client, Item) {
    let actor: Actor = create_test_actor();
    let client: Client = service
        .create_client(&actor, client_draft("Maria Silva", "529.982.247-25"))
        .unwrap();
    let item: Item = service
        .create_item(&actor, item_draft("Mesa Provençal", 10))
        .unwrap();
    (client, item)
}
