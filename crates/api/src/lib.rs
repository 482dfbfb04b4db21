// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the party rental system.
//!
//! [`RentalService`] is what collaborators call. It owns a record store,
//! turns requests into core commands and translates every lower-layer
//! error into [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

mod clock;
mod credentials;
mod error;
mod request_response;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{hash_password, verify_password};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use request_response::{
    AdjustQuantityRequest, AvailabilityResponse, ChangePasswordRequest, ClearResponse,
    ClientHistory, CreateUserRequest, LoginRequest, ResetPasswordRequest,
};
pub use service::RentalService;
