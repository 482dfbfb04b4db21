// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use partyrent_api::{FixedClock, RentalService};
use partyrent_persistence::MemoryStore;
use serde_json::{Value, json};
use time::macros::datetime;
use tower::ServiceExt;

use crate::actor::{USER_ID_HEADER, USER_NAME_HEADER, USER_ROLE_HEADER};
use crate::{AppState, DynStore, build_router};

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn create_test_service(store: DynStore) -> RentalService<DynStore> {
    RentalService::new(store)
        .with_clock(FixedClock(datetime!(2024-01-01 12:00 UTC)))
        .with_hash_cost(4)
}

/// A router over an empty, unbounded in-memory store.
pub fn create_test_app() -> Router {
    create_test_app_with_store(Box::new(MemoryStore::new()))
}

pub fn create_test_app_with_store(store: DynStore) -> Router {
    build_router(AppState::new(create_test_service(store)))
}

/// Who a test request claims to be.
#[derive(Debug, Clone, Copy)]
pub enum As {
    Admin,
    Operator,
    Nobody,
}

/// Sends one request and returns the status with the decoded JSON body.
///
/// Empty bodies decode as `Value::Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    who: As,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    match who {
        As::Admin => {
            builder = builder
                .header(USER_ID_HEADER, "admin-123")
                .header(USER_NAME_HEADER, "Admin")
                .header(USER_ROLE_HEADER, "admin");
        }
        As::Operator => {
            builder = builder
                .header(USER_ID_HEADER, "operator-456")
                .header(USER_NAME_HEADER, "Operator")
                .header(USER_ROLE_HEADER, "operator");
        }
        As::Nobody => {}
    }

    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn item_body(name: &str, total: u32) -> Value {
    json!({
        "name": name,
        "category": "MOVEIS",
        "quantity_total": total,
        "rental_value": 5000,
        "replacement_value": 30000
    })
}

pub fn client_body(name: &str, cpf: &str) -> Value {
    json!({
        "full_name": name,
        "cpf": cpf,
        "phone": "(11) 98765-4321"
    })
}

pub fn order_body(client_id: &str, status: &str, item_id: &str, quantity: u32) -> Value {
    json!({
        "client_id": client_id,
        "party_type": "POCKET",
        "pickup_date": "2024-03-10",
        "return_date": "2024-03-12",
        "items": [{ "item_id": item_id, "quantity": quantity }],
        "payment_method": "PIX",
        "status": status
    })
}

/// Creates a client and a ten-unit item, returning their ids.
pub async fn seed_rental(app: &Router) -> (String, String) {
    let (status, client) = send(
        app,
        "POST",
        "/clients",
        As::Operator,
        Some(client_body("Maria Silva", "529.982.247-25")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, item) = send(
        app,
        "POST",
        "/items",
        As::Operator,
        Some(item_body("Mesa Provençal", 10)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (
        client["id"].as_str().unwrap().to_string(),
        item["id"].as_str().unwrap().to_string(),
    )
}

/// A fresh, not yet created directory under the system temp dir.
pub fn temp_mirror_dir(label: &str) -> PathBuf {
    let n: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "partyrent-server-{label}-{}-{n}",
        std::process::id()
    ))
}
