// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::records::{Client, Item, OrderItem, User};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Strips every non-digit character.
#[must_use]
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Converts an ASCII digit string into its digit values.
fn digit_values(digits: &str) -> Vec<u32> {
    digits.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Returns whether every digit is the same (e.g. `111.111.111-11`).
fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

/// Validates a CPF by length and both check digits.
///
/// Formatting characters are ignored.
///
/// # Errors
///
/// Returns `DomainError::InvalidCpf` if the CPF does not have 11 digits,
/// repeats a single digit, or fails the checksum.
pub fn validate_cpf(cpf: &str) -> Result<(), DomainError> {
    let digits: Vec<u32> = digit_values(&digits_only(cpf));

    if digits.len() != 11 {
        return Err(DomainError::InvalidCpf(String::from(
            "CPF must have 11 digits",
        )));
    }
    if all_same(&digits) {
        return Err(DomainError::InvalidCpf(String::from(
            "CPF cannot repeat a single digit",
        )));
    }

    for check_position in [9_usize, 10] {
        let weight_start: u32 = u32::try_from(check_position).unwrap_or(0) + 1;
        let sum: u32 = digits
            .iter()
            .take(check_position)
            .zip((2..=weight_start).rev())
            .map(|(digit, weight)| digit * weight)
            .sum();
        let mut expected: u32 = 11 - (sum % 11);
        if expected >= 10 {
            expected = 0;
        }
        if expected != digits[check_position] {
            return Err(DomainError::InvalidCpf(String::from(
                "CPF check digits do not match",
            )));
        }
    }

    Ok(())
}

/// Validates a CNPJ by length and both check digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidCnpj` if the CNPJ does not have 14 digits,
/// repeats a single digit, or fails the checksum.
pub fn validate_cnpj(cnpj: &str) -> Result<(), DomainError> {
    let digits: Vec<u32> = digit_values(&digits_only(cnpj));

    if digits.len() != 14 {
        return Err(DomainError::InvalidCnpj(String::from(
            "CNPJ must have 14 digits",
        )));
    }
    if all_same(&digits) {
        return Err(DomainError::InvalidCnpj(String::from(
            "CNPJ cannot repeat a single digit",
        )));
    }

    for (check_position, first_weight) in [(12_usize, 5_u32), (13, 6)] {
        let mut weight: u32 = first_weight;
        let mut sum: u32 = 0;
        for digit in digits.iter().take(check_position) {
            sum += digit * weight;
            weight = if weight == 2 { 9 } else { weight - 1 };
        }
        let remainder: u32 = sum % 11;
        let expected: u32 = if remainder < 2 { 0 } else { 11 - remainder };
        if expected != digits[check_position] {
            return Err(DomainError::InvalidCnpj(String::from(
                "CNPJ check digits do not match",
            )));
        }
    }

    Ok(())
}

/// Validates a supplier document, which may be a CPF or a CNPJ.
///
/// Empty documents are accepted.
///
/// # Errors
///
/// Returns an error if a non-empty document is neither a valid CPF nor a
/// valid CNPJ.
pub fn validate_cpf_or_cnpj(document: &str) -> Result<(), DomainError> {
    let digits: String = digits_only(document);
    match digits.len() {
        0 => Ok(()),
        11 => validate_cpf(&digits),
        _ => validate_cnpj(&digits),
    }
}

/// Validates the basic shape of an email address.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is empty or has no
/// `local@domain` shape.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let trimmed: &str = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(DomainError::InvalidEmail(format!(
            "'{trimmed}' is not a valid email address"
        ))),
    }
}

/// Validates that a required name is not blank.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank.
pub fn validate_name(name: &str, what: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// Validates a CPF is not already used by another client.
///
/// Comparison uses digits only, so formatting variants of the same number
/// are duplicates.
///
/// # Arguments
///
/// * `cpf` - The CPF to check
/// * `existing_clients` - All stored clients
/// * `exclude_id` - A client to ignore (the one being updated)
///
/// # Errors
///
/// Returns `DomainError::DuplicateCpf` if another client has the same digits.
pub fn validate_cpf_unique(
    cpf: &str,
    existing_clients: &[Client],
    exclude_id: Option<&str>,
) -> Result<(), DomainError> {
    let wanted: String = digits_only(cpf);
    let duplicate: bool = existing_clients
        .iter()
        .filter(|client| Some(client.id.as_str()) != exclude_id)
        .any(|client| digits_only(&client.cpf) == wanted);

    if duplicate {
        return Err(DomainError::DuplicateCpf { cpf: wanted });
    }
    Ok(())
}

/// Validates an email is not already used by another user.
///
/// Comparison is case-insensitive.
///
/// # Errors
///
/// Returns `DomainError::DuplicateEmail` if another user has the address.
pub fn validate_email_unique(
    email: &str,
    existing_users: &[User],
    exclude_id: Option<&str>,
) -> Result<(), DomainError> {
    let wanted: String = email.trim().to_lowercase();
    let duplicate: bool = existing_users
        .iter()
        .filter(|user| Some(user.id.as_str()) != exclude_id)
        .any(|user| user.email.trim().to_lowercase() == wanted);

    if duplicate {
        return Err(DomainError::DuplicateEmail {
            email: email.trim().to_string(),
        });
    }
    Ok(())
}

/// Validates the field constraints of an item.
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank
/// - `quantity_maintenance` exceeds `quantity_total`
/// - A monetary value is negative
pub fn validate_item_fields(item: &Item) -> Result<(), DomainError> {
    validate_name(&item.name, "Item name")?;

    // Rule: maintenance holds cannot exceed owned stock
    if item.quantity_maintenance > item.quantity_total {
        return Err(DomainError::MaintenanceExceedsTotal {
            maintenance: item.quantity_maintenance,
            total: item.quantity_total,
        });
    }

    if item.rental_value.is_negative() {
        return Err(DomainError::NegativeAmount {
            field: "rental_value",
        });
    }
    if item.replacement_value.is_negative() {
        return Err(DomainError::NegativeAmount {
            field: "replacement_value",
        });
    }

    Ok(())
}

/// Applies a signed adjustment to an owned quantity.
///
/// # Errors
///
/// Returns `DomainError::NegativeQuantity` if the result would be negative.
pub fn adjusted_quantity(total: u32, delta: i64) -> Result<u32, DomainError> {
    let adjusted: i64 = i64::from(total).saturating_add(delta);
    u32::try_from(adjusted).map_err(|_| DomainError::NegativeQuantity { total, delta })
}

/// Validates the lines of an order.
///
/// # Errors
///
/// Returns an error if a line books zero units or has a negative unit value.
pub fn validate_order_lines(lines: &[OrderItem]) -> Result<(), DomainError> {
    for line in lines {
        if line.quantity == 0 {
            return Err(DomainError::InvalidLineQuantity {
                item_name: line.item_name.clone(),
            });
        }
        if line.unit_value.is_negative() {
            return Err(DomainError::NegativeAmount {
                field: "unit_value",
            });
        }
    }
    Ok(())
}

/// Validates a new password.
///
/// # Errors
///
/// Returns `DomainError::PasswordTooShort` if the password is shorter than
/// [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}
