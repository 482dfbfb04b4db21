// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor extraction for mutating requests.
//!
//! The acting user is read from request headers and used only to stamp
//! audit entries. Nothing here authenticates the caller.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use partyrent_audit::Actor;
use partyrent_domain::UserRole;
use tracing::{debug, warn};

use crate::ErrorResponse;

/// Header carrying the acting user's id. Required.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the acting user's display name. Defaults to the id.
pub const USER_NAME_HEADER: &str = "x-user-name";
/// Header carrying the acting user's role. Defaults to `user`.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor for the actor behind a mutating request.
///
/// ```ignore
/// async fn my_handler(RequestActor(actor): RequestActor) -> Result<Json<Item>, HttpError> {
///     // actor: partyrent_audit::Actor
/// }
/// ```
pub struct RequestActor(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for RequestActor {
    type Rejection = ActorError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id: String = header_value(parts, USER_ID_HEADER)?
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                debug!("Missing {USER_ID_HEADER} header");
                ActorError::MissingUserId
            })?;

        let name: String = header_value(parts, USER_NAME_HEADER)?
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| id.clone());

        let role: UserRole = match header_value(parts, USER_ROLE_HEADER)? {
            Some(raw) => raw.parse().map_err(|_| {
                warn!(role = %raw, "Unknown actor role");
                ActorError::InvalidRole(raw)
            })?,
            None => UserRole::default(),
        };

        debug!(user_id = %id, role = %role, "Actor extracted");
        Ok(Self(Actor::new(id, name, role)))
    }
}

fn header_value(parts: &Parts, name: &'static str) -> Result<Option<String>, ActorError> {
    parts
        .headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(|s| s.trim().to_string())
                .map_err(|_| {
                    warn!(header = name, "Header is not valid ASCII");
                    ActorError::InvalidHeader(name)
                })
        })
        .transpose()
}

/// Actor extraction errors.
#[derive(Debug)]
pub enum ActorError {
    MissingUserId,
    InvalidHeader(&'static str),
    InvalidRole(String),
}

impl IntoResponse for ActorError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingUserId => (
                StatusCode::UNAUTHORIZED,
                format!("Missing {USER_ID_HEADER} header"),
            ),
            Self::InvalidHeader(name) => {
                (StatusCode::BAD_REQUEST, format!("Invalid {name} header"))
            }
            Self::InvalidRole(role) => (StatusCode::BAD_REQUEST, format!("Invalid role: {role}")),
        };

        ErrorResponse::new(message).into_response_with(status)
    }
}
