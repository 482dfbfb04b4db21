// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required name is empty.
    InvalidName(String),
    /// A CPF failed format or checksum validation.
    InvalidCpf(String),
    /// A CNPJ failed format or checksum validation.
    InvalidCnpj(String),
    /// An email address is malformed.
    InvalidEmail(String),
    /// An order status string is not recognized.
    InvalidStatus(String),
    /// A user role string is not recognized.
    InvalidRole(String),
    /// Another client already uses this CPF.
    DuplicateCpf {
        /// The CPF digits.
        cpf: String,
    },
    /// Another user already uses this email.
    DuplicateEmail {
        /// The email address.
        email: String,
    },
    /// More units are in maintenance than the item owns.
    MaintenanceExceedsTotal {
        /// Units in maintenance.
        maintenance: u32,
        /// Units owned.
        total: u32,
    },
    /// A stock adjustment would drive the owned quantity below zero.
    NegativeQuantity {
        /// The current owned quantity.
        total: u32,
        /// The requested adjustment.
        delta: i64,
    },
    /// A monetary field is negative.
    NegativeAmount {
        /// The offending field.
        field: &'static str,
    },
    /// An order line requests zero units.
    InvalidLineQuantity {
        /// The item named by the line.
        item_name: String,
    },
    /// The end of a date interval precedes its start.
    InvalidDateRange {
        /// The first day.
        start: Date,
        /// The last day.
        end: Date,
    },
    /// Failed to parse a date string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// An order has no client.
    MissingClient,
    /// An order has no payment method.
    MissingPaymentMethod,
    /// An order entering an active status has no pickup or return date.
    MissingRentalDates,
    /// Requested quantity exceeds what is free for the rental period.
    InsufficientStock {
        /// The item named by the order line.
        item_name: String,
        /// Units free in the period.
        available: u32,
        /// Units requested.
        requested: u32,
    },
    /// An item cannot be deleted while active orders reference it.
    ItemInUse {
        /// The item.
        item_id: String,
        /// How many active orders reference it.
        active_orders: usize,
    },
    /// Item does not exist.
    ItemNotFound(String),
    /// Order does not exist.
    OrderNotFound(String),
    /// Client does not exist.
    ClientNotFound(String),
    /// Supplier does not exist.
    SupplierNotFound(String),
    /// User does not exist.
    UserNotFound(String),
    /// A user tried to delete their own account.
    CannotDeleteSelf,
    /// A new password is too short.
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// The current password did not verify.
    IncorrectPassword,
    /// The action requires the admin role.
    AdminRequired {
        /// The attempted action.
        action: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidCpf(msg) => write!(f, "Invalid CPF: {msg}"),
            Self::InvalidCnpj(msg) => write!(f, "Invalid CNPJ: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidStatus(status) => write!(f, "Invalid order status: {status}"),
            Self::InvalidRole(role) => write!(f, "Invalid user role: {role}"),
            Self::DuplicateCpf { cpf } => {
                write!(f, "A client with CPF {cpf} already exists")
            }
            Self::DuplicateEmail { email } => {
                write!(f, "A user with email '{email}' already exists")
            }
            Self::MaintenanceExceedsTotal { maintenance, total } => {
                write!(
                    f,
                    "Maintenance quantity {maintenance} exceeds total quantity {total}"
                )
            }
            Self::NegativeQuantity { total, delta } => {
                write!(
                    f,
                    "Adjusting total quantity {total} by {delta} would make it negative"
                )
            }
            Self::NegativeAmount { field } => write!(f, "{field} cannot be negative"),
            Self::InvalidLineQuantity { item_name } => {
                write!(f, "Quantity for item '{item_name}' must be at least 1")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Return date {end} is before pickup date {start}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::MissingClient => write!(f, "Client is required"),
            Self::MissingPaymentMethod => write!(f, "Payment method is required"),
            Self::MissingRentalDates => write!(
                f,
                "Pickup and return dates are required for confirmed orders"
            ),
            Self::InsufficientStock {
                item_name,
                available,
                requested,
            } => {
                write!(
                    f,
                    "Insufficient stock for item '{item_name}': available {available}, requested {requested}"
                )
            }
            Self::ItemInUse {
                item_id,
                active_orders,
            } => {
                write!(
                    f,
                    "Item {item_id} cannot be deleted: it is used by {active_orders} active order(s)"
                )
            }
            Self::ItemNotFound(id) => write!(f, "Item {id} not found"),
            Self::OrderNotFound(id) => write!(f, "Order {id} not found"),
            Self::ClientNotFound(id) => write!(f, "Client {id} not found"),
            Self::SupplierNotFound(id) => write!(f, "Supplier {id} not found"),
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::CannotDeleteSelf => write!(f, "You cannot delete your own user"),
            Self::PasswordTooShort { min } => {
                write!(f, "New password must have at least {min} characters")
            }
            Self::IncorrectPassword => write!(f, "Current password is incorrect"),
            Self::AdminRequired { action } => {
                write!(f, "Only administrators may {action}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
