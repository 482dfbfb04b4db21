// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password hashing and verification.
//!
//! Stored users only ever carry a bcrypt hash. Plain passwords never reach
//! the core or the record store.

use partyrent_domain::validate_password;
use tracing::warn;

use crate::error::{ApiError, translate_domain_error};

/// Validates a new password and hashes it.
///
/// # Errors
///
/// Returns `ApiError::Validation` if the password is too short, or
/// `ApiError::Storage` if hashing fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    validate_password(password).map_err(translate_domain_error)?;
    bcrypt::hash(password, cost).map_err(|e| ApiError::Storage {
        message: format!("Failed to hash password: {e}"),
    })
}

/// Checks a password against a stored hash.
///
/// A missing or malformed hash never verifies.
#[must_use]
pub fn verify_password(password: &str, password_hash: Option<&str>) -> bool {
    let Some(hash) = password_hash else {
        return false;
    };
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            warn!(error = %e, "Stored password hash is unreadable");
            false
        }
    }
}
