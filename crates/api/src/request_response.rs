// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types that have no counterpart in the core.

use partyrent_domain::{Client, Money, Order, UserRole};
use serde::{Deserialize, Serialize};

/// Request to create a user with a plain password.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    pub password: String,
}

/// Request to change one's own password.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Request to reset any user's password.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Request to add or remove owned units of an item.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AdjustQuantityRequest {
    pub delta: i64,
}

/// Login credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A client with their rental history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientHistory {
    pub client: Client,
    /// Orders placed by the client, newest first.
    pub orders: Vec<Order>,
    pub order_count: usize,
    /// Sum of paid, delivered and returned orders.
    pub total_spent: Money,
}

/// Units of an item free for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityResponse {
    pub available: u32,
}

/// Result of a bulk clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClearResponse {
    pub removed: usize,
}
