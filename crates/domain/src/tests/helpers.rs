// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Client, ClientStatus, DateRange, Item, ItemCategory, ItemCondition, ItemLocation, Money,
    Order, OrderItem, OrderStatus, PartyType, PaymentMethod, User, UserRole,
};
use time::OffsetDateTime;

pub fn create_test_item(id: &str, total: u32, maintenance: u32) -> Item {
    Item {
        id: id.to_string(),
        code: String::from("CAD-001"),
        name: String::from("Painel Redondo"),
        category: ItemCategory::Paineis,
        description: None,
        quantity_total: total,
        quantity_maintenance: maintenance,
        location: ItemLocation::Stock,
        condition: ItemCondition::Normal,
        damage_description: None,
        rental_value: Money::from_cents(8000),
        replacement_value: Money::from_cents(60000),
        dimensions: None,
        material: None,
        photos: Vec::new(),
        supplier_id: None,
        created_by: String::from("admin"),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

pub fn create_test_order(id: &str, status: OrderStatus, period: Option<DateRange>) -> Order {
    Order {
        id: id.to_string(),
        code: String::from("PED-001"),
        client_id: String::from("client-1"),
        client_name: String::from("Ana Souza"),
        party_type: PartyType::Bronze,
        pickup_date: period.map(|p| p.start()),
        pickup_time: None,
        return_date: period.map(|p| p.end()),
        return_time: None,
        assembly_date: None,
        assembly_time: None,
        disassembly_date: None,
        disassembly_time: None,
        items: vec![OrderItem {
            item_id: String::from("item-1"),
            item_code: String::from("CAD-001"),
            item_name: String::from("Painel Redondo"),
            quantity: 1,
            unit_value: Money::from_cents(8000),
            replacement_value: None,
            total_value: Money::from_cents(8000),
        }],
        total_value: Money::from_cents(8000),
        payment_method: PaymentMethod::Cash,
        amount_paid: Money::ZERO,
        amount_pending: Money::ZERO,
        installments: None,
        status,
        inspiration_photos: Vec::new(),
        assembly_photos: Vec::new(),
        created_by: String::from("admin"),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

pub fn create_test_client(id: &str, cpf: &str) -> Client {
    Client {
        id: id.to_string(),
        full_name: String::from("Ana Souza"),
        cpf: cpf.to_string(),
        phone: String::from("(11) 99999-0000"),
        email: None,
        address: String::new(),
        birth_date: None,
        status: ClientStatus::Active,
        notes: None,
        total_spent: Money::ZERO,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

pub fn create_test_user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: String::from("Operator"),
        email: email.to_string(),
        role: UserRole::Operator,
        password_hash: Some(String::from("hash")),
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}
