// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use partyrent::CoreError;
use partyrent_domain::DomainError;
use partyrent_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain, core and persistence errors and
/// represent the contract collaborators program against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required field is missing or malformed.
    #[error("Invalid input for field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request collides with existing data.
    #[error("{message}")]
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource does not exist.
    #[error("{message}")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The local store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the failure.
        message: String,
    },
    /// The local store ran out of space.
    #[error("Storage is full: {message}")]
    StorageFull {
        /// A description of the failure.
        message: String,
    },
}

impl ApiError {
    fn validation(field: &str, err: &DomainError) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: err.to_string(),
        }
    }

    fn conflict(rule: &str, err: &DomainError) -> Self {
        Self::Conflict {
            rule: rule.to_string(),
            message: err.to_string(),
        }
    }

    fn not_found(resource_type: &str, err: &DomainError) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_string(),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidName(_) => ApiError::validation("name", &err),
        DomainError::InvalidCpf(_) => ApiError::validation("cpf", &err),
        DomainError::InvalidCnpj(_) => ApiError::validation("cpf_cnpj", &err),
        DomainError::InvalidEmail(_) => ApiError::validation("email", &err),
        DomainError::InvalidStatus(_) => ApiError::validation("status", &err),
        DomainError::InvalidRole(_) => ApiError::validation("role", &err),
        DomainError::MaintenanceExceedsTotal { .. } => {
            ApiError::validation("quantity_maintenance", &err)
        }
        DomainError::NegativeQuantity { .. } => ApiError::validation("quantity_total", &err),
        DomainError::NegativeAmount { field } => ApiError::validation(field, &err),
        DomainError::InvalidLineQuantity { .. } => ApiError::validation("items", &err),
        DomainError::InvalidDateRange { .. } => ApiError::validation("return_date", &err),
        DomainError::DateParseError { .. } => ApiError::validation("date", &err),
        DomainError::MissingClient => ApiError::validation("client_id", &err),
        DomainError::MissingPaymentMethod => ApiError::validation("payment_method", &err),
        DomainError::MissingRentalDates => ApiError::validation("pickup_date", &err),
        DomainError::PasswordTooShort { .. } => ApiError::validation("new_password", &err),
        DomainError::IncorrectPassword => ApiError::validation("current_password", &err),
        DomainError::DuplicateCpf { .. } => ApiError::conflict("unique_cpf", &err),
        DomainError::DuplicateEmail { .. } => ApiError::conflict("unique_email", &err),
        DomainError::InsufficientStock { .. } => ApiError::conflict("stock_available", &err),
        DomainError::ItemInUse { .. } => ApiError::conflict("item_in_use", &err),
        DomainError::CannotDeleteSelf => ApiError::conflict("not_self", &err),
        DomainError::AdminRequired { .. } => ApiError::conflict("admin_only", &err),
        DomainError::ItemNotFound(_) => ApiError::not_found("Item", &err),
        DomainError::OrderNotFound(_) => ApiError::not_found("Order", &err),
        DomainError::ClientNotFound(_) => ApiError::not_found("Client", &err),
        DomainError::SupplierNotFound(_) => ApiError::not_found("Supplier", &err),
        DomainError::UserNotFound(_) => ApiError::not_found("User", &err),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Only exhausted capacity is reported as `StorageFull`; everything else
/// is a generic storage failure.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::StorageFull(message) => ApiError::StorageFull { message },
        PersistenceError::Storage(message)
        | PersistenceError::DatabaseConnectionFailed(message)
        | PersistenceError::MigrationFailed(message)
        | PersistenceError::Serialization(message)
        | PersistenceError::Corrupt(message)
        | PersistenceError::Mirror(message) => ApiError::Storage { message },
    }
}
