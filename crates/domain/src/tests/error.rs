// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_insufficient_stock_names_item_and_available_quantity() {
    let err: DomainError = DomainError::InsufficientStock {
        item_name: String::from("Mesa Provençal"),
        available: 6,
        requested: 7,
    };
    assert_eq!(
        format!("{err}"),
        "Insufficient stock for item 'Mesa Provençal': available 6, requested 7"
    );
}

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::DuplicateCpf {
        cpf: String::from("52998224725"),
    };
    assert_eq!(
        format!("{err}"),
        "A client with CPF 52998224725 already exists"
    );

    let err: DomainError = DomainError::ItemInUse {
        item_id: String::from("item-1"),
        active_orders: 2,
    };
    assert_eq!(
        format!("{err}"),
        "Item item-1 cannot be deleted: it is used by 2 active order(s)"
    );

    let err: DomainError = DomainError::MissingRentalDates;
    assert_eq!(
        format!("{err}"),
        "Pickup and return dates are required for confirmed orders"
    );

    let err: DomainError = DomainError::PasswordTooShort { min: 4 };
    assert_eq!(
        format!("{err}"),
        "New password must have at least 4 characters"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::CannotDeleteSelf);
    assert_eq!(err.to_string(), "You cannot delete your own user");
}
