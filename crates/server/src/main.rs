// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod actor;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use partyrent::{
    ClientDraft, ClientPatch, ItemDraft, ItemPatch, OrderDraft, OrderPatch, SupplierDraft,
    UserPatch,
};
use partyrent_api::{
    AdjustQuantityRequest, ApiError, AvailabilityResponse, ChangePasswordRequest, ClearResponse,
    ClientHistory, CreateUserRequest, LoginRequest, RentalService, ResetPasswordRequest,
    translate_domain_error,
};
use partyrent_audit::{AuditEntry, EntityType};
use partyrent_domain::{
    Alert, AvailabilityResult, Client, Item, Order, Supplier, User, parse_date,
};
use partyrent_persistence::{
    DirectoryMirror, RecordStore, ReplicatingStore, SqliteStore, pull_from_mirror,
    spawn_replicator,
};
use serde::{Deserialize, Serialize};
use time::Date;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::actor::RequestActor;

/// Party rental server - HTTP server for the rental management system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory to mirror saved collections into. Replication is off when omitted.
    #[arg(short, long)]
    mirror_dir: Option<PathBuf>,

    /// Copy mirror contents into the local store before serving
    #[arg(long, requires = "mirror_dir")]
    pull_on_start: bool,
}

/// The store every request goes through.
type DynStore = Box<dyn RecordStore + Send>;

/// Application state shared across handlers.
///
/// Every request takes the same lock, so availability checks and the writes
/// that depend on them never interleave.
#[derive(Clone)]
struct AppState {
    service: Arc<Mutex<RentalService<DynStore>>>,
}

impl AppState {
    fn new(service: RentalService<DynStore>) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

impl ErrorResponse {
    const fn new(message: String) -> Self {
        Self {
            error: true,
            message,
        }
    }

    fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    const fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        ErrorResponse::new(self.message).into_response_with(self.status)
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => {
                error!(error = %err, "Storage error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::StorageFull { .. } => {
                error!(error = %err, "Storage is full");
                StatusCode::INSUFFICIENT_STORAGE
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Query parameters naming an inclusive date range.
#[derive(Debug, Deserialize)]
struct PeriodQuery {
    /// First day, `YYYY-MM-DD`.
    start: String,
    /// Last day, `YYYY-MM-DD`.
    end: String,
}

impl PeriodQuery {
    fn dates(&self) -> Result<(Date, Date), HttpError> {
        let start: Date = parse_date(&self.start).map_err(translate_domain_error)?;
        let end: Date = parse_date(&self.end).map_err(translate_domain_error)?;
        Ok((start, end))
    }
}

#[derive(Debug, Deserialize)]
struct ClientQuery {
    /// Free-text search over name, CPF, phone and email.
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuditQuery {
    entity_type: Option<String>,
    entity_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

async fn handle_list_items(AxumState(app_state): AxumState<AppState>) -> Json<Vec<Item>> {
    Json(app_state.service.lock().await.list_items())
}

async fn handle_get_item(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, HttpError> {
    Ok(Json(app_state.service.lock().await.get_item(&id)?))
}

async fn handle_get_item_by_code(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Item>, HttpError> {
    Ok(Json(app_state.service.lock().await.get_item_by_code(&code)?))
}

/// Handler for POST `/items`.
async fn handle_create_item(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Json(draft): Json<ItemDraft>,
) -> Result<(StatusCode, Json<Item>), HttpError> {
    info!(actor_id = %actor.id, name = %draft.name, "Handling create_item request");
    let item: Item = app_state.service.lock().await.create_item(&actor, draft)?;
    info!(item_id = %item.id, code = %item.code, "Created item");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn handle_update_item(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<Item>, HttpError> {
    info!(actor_id = %actor.id, item_id = %id, "Handling update_item request");
    let item: Item = app_state
        .service
        .lock()
        .await
        .update_item(&actor, &id, patch)?;
    Ok(Json(item))
}

/// Handler for POST `/items/{id}/adjust`.
///
/// Adds or removes owned units.
async fn handle_adjust_item(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(req): Json<AdjustQuantityRequest>,
) -> Result<Json<Item>, HttpError> {
    info!(actor_id = %actor.id, item_id = %id, delta = req.delta, "Handling adjust_item request");
    let item: Item = app_state
        .service
        .lock()
        .await
        .adjust_item_quantity(&actor, &id, req.delta)?;
    Ok(Json(item))
}

async fn handle_delete_item(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(actor_id = %actor.id, item_id = %id, "Handling delete_item request");
    app_state.service.lock().await.delete_item(&actor, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/items/{id}/availability`.
async fn handle_item_availability(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    let (start, end) = period.dates()?;
    let available: u32 = app_state
        .service
        .lock()
        .await
        .item_availability(&id, start, end)?;
    Ok(Json(AvailabilityResponse { available }))
}

async fn handle_item_availability_breakdown(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<AvailabilityResult>, HttpError> {
    let (start, end) = period.dates()?;
    let result: AvailabilityResult = app_state
        .service
        .lock()
        .await
        .item_availability_breakdown(&id, start, end)?;
    Ok(Json(result))
}

/// Handler for GET `/items/available`.
///
/// Lists items with at least one unit free for the whole period.
async fn handle_list_available_items(
    AxumState(app_state): AxumState<AppState>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<Vec<Item>>, HttpError> {
    let (start, end) = period.dates()?;
    let items: Vec<Item> = app_state
        .service
        .lock()
        .await
        .list_available_items(start, end)?;
    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

async fn handle_list_orders(AxumState(app_state): AxumState<AppState>) -> Json<Vec<Order>> {
    Json(app_state.service.lock().await.list_orders())
}

async fn handle_get_order(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, HttpError> {
    Ok(Json(app_state.service.lock().await.get_order(&id)?))
}

/// Handler for POST `/orders`.
///
/// Active orders are checked against stock before anything is written.
async fn handle_create_order(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<Order>), HttpError> {
    info!(
        actor_id = %actor.id,
        client_id = %draft.client_id,
        status = %draft.status,
        lines = draft.items.len(),
        "Handling create_order request"
    );
    let order: Order = app_state.service.lock().await.create_order(&actor, draft)?;
    info!(order_id = %order.id, code = %order.code, "Created order");
    Ok((StatusCode::CREATED, Json(order)))
}

async fn handle_update_order(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(patch): Json<OrderPatch>,
) -> Result<Json<Order>, HttpError> {
    info!(actor_id = %actor.id, order_id = %id, "Handling update_order request");
    let order: Order = app_state
        .service
        .lock()
        .await
        .update_order(&actor, &id, patch)?;
    Ok(Json(order))
}

async fn handle_delete_order(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(actor_id = %actor.id, order_id = %id, "Handling delete_order request");
    app_state.service.lock().await.delete_order(&actor, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

/// Handler for GET `/clients`. A `q` parameter turns the listing into a search.
async fn handle_list_clients(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ClientQuery>,
) -> Json<Vec<Client>> {
    let mut service = app_state.service.lock().await;
    let clients: Vec<Client> = match query.q.as_deref() {
        Some(q) => service.search_clients(q),
        None => service.list_clients(),
    };
    drop(service);
    Json(clients)
}

async fn handle_get_client(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Client>, HttpError> {
    Ok(Json(app_state.service.lock().await.get_client(&id)?))
}

async fn handle_get_client_by_cpf(
    AxumState(app_state): AxumState<AppState>,
    Path(cpf): Path<String>,
) -> Result<Json<Client>, HttpError> {
    Ok(Json(app_state.service.lock().await.get_client_by_cpf(&cpf)?))
}

async fn handle_client_orders(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Order>> {
    Json(app_state.service.lock().await.orders_by_client(&id))
}

async fn handle_client_history(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClientHistory>, HttpError> {
    Ok(Json(app_state.service.lock().await.client_history(&id)?))
}

async fn handle_create_client(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Json(draft): Json<ClientDraft>,
) -> Result<(StatusCode, Json<Client>), HttpError> {
    info!(actor_id = %actor.id, "Handling create_client request");
    let client: Client = app_state
        .service
        .lock()
        .await
        .create_client(&actor, draft)?;
    info!(client_id = %client.id, "Created client");
    Ok((StatusCode::CREATED, Json(client)))
}

async fn handle_update_client(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(patch): Json<ClientPatch>,
) -> Result<Json<Client>, HttpError> {
    info!(actor_id = %actor.id, client_id = %id, "Handling update_client request");
    let client: Client = app_state
        .service
        .lock()
        .await
        .update_client(&actor, &id, patch)?;
    Ok(Json(client))
}

async fn handle_delete_client(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(actor_id = %actor.id, client_id = %id, "Handling delete_client request");
    app_state.service.lock().await.delete_client(&actor, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Suppliers
// ---------------------------------------------------------------------------

async fn handle_list_suppliers(AxumState(app_state): AxumState<AppState>) -> Json<Vec<Supplier>> {
    Json(app_state.service.lock().await.list_suppliers())
}

async fn handle_get_supplier(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Supplier>, HttpError> {
    Ok(Json(app_state.service.lock().await.get_supplier(&id)?))
}

async fn handle_create_supplier(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Json(draft): Json<SupplierDraft>,
) -> Result<(StatusCode, Json<Supplier>), HttpError> {
    info!(actor_id = %actor.id, name = %draft.name, "Handling create_supplier request");
    let supplier: Supplier = app_state
        .service
        .lock()
        .await
        .create_supplier(&actor, draft)?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

async fn handle_delete_supplier(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(actor_id = %actor.id, supplier_id = %id, "Handling delete_supplier request");
    app_state.service.lock().await.delete_supplier(&actor, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

async fn handle_list_users(AxumState(app_state): AxumState<AppState>) -> Json<Vec<User>> {
    Json(app_state.service.lock().await.list_users())
}

async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, HttpError> {
    Ok(Json(app_state.service.lock().await.get_user(&id)?))
}

async fn handle_get_user_by_email(
    AxumState(app_state): AxumState<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, HttpError> {
    Ok(Json(app_state.service.lock().await.get_user_by_email(&email)?))
}

async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), HttpError> {
    info!(actor_id = %actor.id, email = %req.email, role = %req.role, "Handling create_user request");
    let user: User = app_state.service.lock().await.create_user(&actor, req)?;
    info!(user_id = %user.id, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, HttpError> {
    info!(actor_id = %actor.id, user_id = %id, "Handling update_user request");
    let user: User = app_state
        .service
        .lock()
        .await
        .update_user(&actor, &id, patch)?;
    Ok(Json(user))
}

async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(actor_id = %actor.id, user_id = %id, "Handling delete_user request");
    app_state.service.lock().await.delete_user(&actor, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/users/{id}/password`.
///
/// Changes a password after verifying the current one.
async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, HttpError> {
    info!(actor_id = %actor.id, user_id = %id, "Handling change_password request");
    app_state
        .service
        .lock()
        .await
        .change_password(&actor, &id, &req)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/users/{id}/reset_password`. Admin only.
async fn handle_reset_password(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<StatusCode, HttpError> {
    info!(actor_id = %actor.id, user_id = %id, "Handling reset_password request");
    app_state
        .service
        .lock()
        .await
        .reset_password(&actor, &id, &req.new_password)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/login`.
///
/// Verifies credentials and returns the user. No session is issued.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, HttpError> {
    let user: User = app_state
        .service
        .lock()
        .await
        .verify_login(&req.email, &req.password)
        .inspect_err(|_| warn!(email = %req.email, "Login failed"))?;
    Ok(Json(user))
}

// ---------------------------------------------------------------------------
// Audit, alerts and system operations
// ---------------------------------------------------------------------------

/// Handler for GET `/audit`.
///
/// Filtering needs both `entity_type` and `entity_id`.
async fn handle_audit(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEntry>>, HttpError> {
    let filter: Option<(EntityType, String)> = match (query.entity_type, query.entity_id) {
        (Some(raw), Some(id)) => {
            let entity_type: EntityType = raw.parse().map_err(HttpError::bad_request)?;
            Some((entity_type, id))
        }
        (None, None) => None,
        _ => {
            return Err(HttpError::bad_request(String::from(
                "entity_type and entity_id must be given together",
            )));
        }
    };

    let mut service = app_state.service.lock().await;
    let entries: Vec<AuditEntry> = match filter {
        Some((entity_type, id)) => service.audit_by_entity(entity_type, &id),
        None => service.audit_entries(),
    };
    drop(service);
    Ok(Json(entries))
}

async fn handle_alerts(AxumState(app_state): AxumState<AppState>) -> Json<Vec<Alert>> {
    Json(app_state.service.lock().await.alerts())
}

async fn handle_clear_catalog(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
) -> Result<Json<ClearResponse>, HttpError> {
    warn!(actor_id = %actor.id, "Clearing catalog");
    let removed: usize = app_state.service.lock().await.clear_catalog(&actor)?;
    Ok(Json(ClearResponse { removed }))
}

async fn handle_clear_orders(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor): RequestActor,
) -> Result<Json<ClearResponse>, HttpError> {
    warn!(actor_id = %actor.id, "Clearing orders");
    let removed: usize = app_state.service.lock().await.clear_orders(&actor)?;
    Ok(Json(ClearResponse { removed }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/items", get(handle_list_items).post(handle_create_item))
        .route("/items/available", get(handle_list_available_items))
        .route("/items/code/{code}", get(handle_get_item_by_code))
        .route(
            "/items/{id}",
            get(handle_get_item)
                .patch(handle_update_item)
                .delete(handle_delete_item),
        )
        .route("/items/{id}/adjust", post(handle_adjust_item))
        .route("/items/{id}/availability", get(handle_item_availability))
        .route(
            "/items/{id}/availability/breakdown",
            get(handle_item_availability_breakdown),
        )
        .route("/orders", get(handle_list_orders).post(handle_create_order))
        .route(
            "/orders/{id}",
            get(handle_get_order)
                .patch(handle_update_order)
                .delete(handle_delete_order),
        )
        .route("/clients", get(handle_list_clients).post(handle_create_client))
        .route("/clients/cpf/{cpf}", get(handle_get_client_by_cpf))
        .route(
            "/clients/{id}",
            get(handle_get_client)
                .patch(handle_update_client)
                .delete(handle_delete_client),
        )
        .route("/clients/{id}/orders", get(handle_client_orders))
        .route("/clients/{id}/history", get(handle_client_history))
        .route(
            "/suppliers",
            get(handle_list_suppliers).post(handle_create_supplier),
        )
        .route(
            "/suppliers/{id}",
            get(handle_get_supplier).delete(handle_delete_supplier),
        )
        .route("/users", get(handle_list_users).post(handle_create_user))
        .route("/users/email/{email}", get(handle_get_user_by_email))
        .route(
            "/users/{id}",
            get(handle_get_user)
                .patch(handle_update_user)
                .delete(handle_delete_user),
        )
        .route("/users/{id}/password", post(handle_change_password))
        .route("/users/{id}/reset_password", post(handle_reset_password))
        .route("/login", post(handle_login))
        .route("/audit", get(handle_audit))
        .route("/alerts", get(handle_alerts))
        .route("/system/clear_catalog", post(handle_clear_catalog))
        .route("/system/clear_orders", post(handle_clear_orders))
        .with_state(app_state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing party rental server");

    let mut store: DynStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Box::new(SqliteStore::new_with_file(db_path)?)
    } else {
        info!("Using in-memory database");
        Box::new(SqliteStore::new_in_memory()?)
    };

    let mut replicator: Option<JoinHandle<()>> = None;
    if let Some(mirror_dir) = &args.mirror_dir {
        let mirror: DirectoryMirror = DirectoryMirror::new(mirror_dir);
        info!(mirror = %mirror.root().display(), "Mirroring collections");
        if args.pull_on_start {
            let replaced = pull_from_mirror(&mirror, &mut store).await;
            info!(replaced = replaced.len(), "Local store seeded from mirror");
        }
        let (handle, task) = spawn_replicator(mirror);
        store = Box::new(ReplicatingStore::new(store, handle));
        replicator = Some(task);
    }

    let app: Router = build_router(AppState::new(RentalService::new(store)));

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router, and with it the last replication handle, is gone; let the
    // replicator drain what is queued.
    if let Some(task) = replicator {
        task.await?;
    }

    Ok(())
}
