// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{
    ClientDraft, ClientPatch, Command, ItemDraft, ItemPatch, OrderDraft, OrderPatch,
    SupplierDraft, UserDraft, UserPatch,
};
use crate::error::CoreError;
use crate::orders::{build_order, enforce_availability, patch_order, requires_gate};
use crate::state::{ChangedCollection, Outcome, State, TransitionContext, TransitionResult};
use partyrent_audit::{ALL_ENTITIES, AuditAction, AuditEntry, Changes, EntityType};
use partyrent_domain::{
    Client, DomainError, ITEM_CODE_PREFIX, Item, Money, ORDER_CODE_PREFIX, Order, Supplier, User,
    adjusted_quantity, digits_only, next_sequential_code, validate_cpf, validate_cpf_or_cnpj,
    validate_cpf_unique, validate_email, validate_email_unique, validate_item_fields,
    validate_name,
};

/// Sets an optional text field from a patch value. An empty string clears it.
fn patch_text(target: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *target = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }
}

/// Treats blank optional text as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Builds the transition result for a mutation of one record.
fn transition(
    new_state: State,
    changed: ChangedCollection,
    ctx: &TransitionContext,
    action: AuditAction,
    entity: (EntityType, String),
    changes: Changes,
    outcome: Outcome,
) -> TransitionResult {
    let (entity_type, entity_id) = entity;
    TransitionResult {
        new_state,
        changed,
        audit_entry: AuditEntry::new(
            ctx.audit_id.clone(),
            &ctx.actor,
            action,
            entity_type,
            entity_id,
            changes,
            ctx.now,
        ),
        outcome,
    }
}

/// Applies a command to the current state, producing a new state and an
/// audit entry.
///
/// This function is pure: it reads no clock and mints no identifiers.
/// Everything it needs comes from `ctx`.
///
/// # Arguments
///
/// * `state` - The current state
/// * `command` - The command to apply
/// * `ctx` - The actor, the time and identifiers for new records
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit entry
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A referenced record does not exist
/// - A field or uniqueness rule is violated
/// - An active order books more stock than is free
pub fn apply(
    state: &State,
    command: Command,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateItem(draft) => create_item(state, draft, ctx),
        Command::UpdateItem { id, patch } => update_item(state, &id, patch, ctx),
        Command::AdjustItemQuantity { id, delta } => adjust_item_quantity(state, &id, delta, ctx),
        Command::DeleteItem { id } => delete_item(state, &id, ctx),
        Command::CreateOrder(draft) => create_order(state, draft, ctx),
        Command::UpdateOrder { id, patch } => update_order(state, &id, patch, ctx),
        Command::DeleteOrder { id } => delete_order(state, &id, ctx),
        Command::CreateClient(draft) => create_client(state, draft, ctx),
        Command::UpdateClient { id, patch } => update_client(state, &id, patch, ctx),
        Command::DeleteClient { id } => delete_client(state, &id, ctx),
        Command::CreateSupplier(draft) => create_supplier(state, draft, ctx),
        Command::DeleteSupplier { id } => delete_supplier(state, &id, ctx),
        Command::CreateUser {
            draft,
            password_hash,
        } => create_user(state, draft, password_hash, ctx),
        Command::UpdateUser { id, patch } => update_user(state, &id, patch, ctx),
        Command::DeleteUser { id } => delete_user(state, &id, ctx),
        Command::ChangePassword { id, password_hash } => {
            set_password(state, &id, password_hash, "Password changed", ctx)
        }
        Command::ResetPassword { id, password_hash } => {
            if !ctx.actor.is_admin() {
                return Err(DomainError::AdminRequired {
                    action: "reset passwords",
                }
                .into());
            }
            set_password(state, &id, password_hash, "Password reset", ctx)
        }
        Command::ClearCatalog => Ok(clear_catalog(state, ctx)),
        Command::ClearOrders => Ok(clear_orders(state, ctx)),
    }
}

fn create_item(
    state: &State,
    draft: ItemDraft,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let code: String = next_sequential_code(
        ITEM_CODE_PREFIX,
        state.items.iter().map(|item| item.code.as_str()),
    );
    let item = Item {
        id: ctx.new_id.clone(),
        code,
        name: draft.name,
        category: draft.category,
        description: non_blank(draft.description),
        quantity_total: draft.quantity_total,
        quantity_maintenance: draft.quantity_maintenance,
        location: draft.location,
        condition: draft.condition,
        damage_description: non_blank(draft.damage_description),
        rental_value: draft.rental_value,
        replacement_value: draft.replacement_value,
        dimensions: non_blank(draft.dimensions),
        material: non_blank(draft.material),
        photos: draft.photos,
        supplier_id: non_blank(draft.supplier_id),
        created_by: ctx.actor.name.clone(),
        created_at: ctx.now,
        updated_at: ctx.now,
    };
    validate_item_fields(&item)?;

    let mut new_state: State = state.clone();
    new_state.items.push(item.clone());

    Ok(transition(
        new_state,
        ChangedCollection::Items,
        ctx,
        AuditAction::Create,
        (EntityType::Item, item.id.clone()),
        Changes::snapshot(&item),
        Outcome::Item(item),
    ))
}

fn update_item(
    state: &State,
    id: &str,
    patch: ItemPatch,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let current: &Item = state
        .item(id)
        .ok_or_else(|| DomainError::ItemNotFound(id.to_string()))?;
    let mut item: Item = current.clone();

    if let Some(name) = patch.name {
        item.name = name;
    }
    if let Some(category) = patch.category {
        item.category = category;
    }
    patch_text(&mut item.description, patch.description);
    if let Some(total) = patch.quantity_total {
        item.quantity_total = total;
    }
    if let Some(maintenance) = patch.quantity_maintenance {
        item.quantity_maintenance = maintenance;
    }
    if let Some(location) = patch.location {
        item.location = location;
    }
    if let Some(condition) = patch.condition {
        item.condition = condition;
    }
    patch_text(&mut item.damage_description, patch.damage_description);
    if let Some(value) = patch.rental_value {
        item.rental_value = value;
    }
    if let Some(value) = patch.replacement_value {
        item.replacement_value = value;
    }
    patch_text(&mut item.dimensions, patch.dimensions);
    patch_text(&mut item.material, patch.material);
    if let Some(photos) = patch.photos {
        item.photos = photos;
    }
    patch_text(&mut item.supplier_id, patch.supplier_id);
    item.updated_at = ctx.now;

    validate_item_fields(&item)?;
    replace_item(state, current, item, ctx)
}

fn adjust_item_quantity(
    state: &State,
    id: &str,
    delta: i64,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let current: &Item = state
        .item(id)
        .ok_or_else(|| DomainError::ItemNotFound(id.to_string()))?;
    let mut item: Item = current.clone();
    item.quantity_total = adjusted_quantity(current.quantity_total, delta)?;
    item.updated_at = ctx.now;

    validate_item_fields(&item)?;
    replace_item(state, current, item, ctx)
}

/// Writes an updated item over its stored version.
fn replace_item(
    state: &State,
    current: &Item,
    item: Item,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let mut new_state: State = state.clone();
    let slot: &mut Item = new_state
        .items
        .iter_mut()
        .find(|stored| stored.id == item.id)
        .ok_or_else(|| DomainError::ItemNotFound(item.id.clone()))?;
    *slot = item.clone();

    Ok(transition(
        new_state,
        ChangedCollection::Items,
        ctx,
        AuditAction::Update,
        (EntityType::Item, item.id.clone()),
        Changes::diff(current, &item),
        Outcome::Item(item),
    ))
}

fn delete_item(
    state: &State,
    id: &str,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let item: &Item = state
        .item(id)
        .ok_or_else(|| DomainError::ItemNotFound(id.to_string()))?;

    // Rule: items held by active orders cannot be deleted
    let active_orders: usize = state
        .orders
        .iter()
        .filter(|order| order.holds_inventory() && order.references_item(id))
        .count();
    if active_orders > 0 {
        return Err(DomainError::ItemInUse {
            item_id: id.to_string(),
            active_orders,
        }
        .into());
    }

    let mut new_state: State = state.clone();
    new_state.items.retain(|stored| stored.id != id);

    Ok(transition(
        new_state,
        ChangedCollection::Items,
        ctx,
        AuditAction::Delete,
        (EntityType::Item, id.to_string()),
        Changes::snapshot(item),
        Outcome::Deleted { id: id.to_string() },
    ))
}

fn create_order(
    state: &State,
    draft: OrderDraft,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let code: String = next_sequential_code(
        ORDER_CODE_PREFIX,
        state.orders.iter().map(|order| order.code.as_str()),
    );
    let order: Order = build_order(
        state,
        draft,
        ctx.new_id.clone(),
        code,
        ctx.actor.name.clone(),
        ctx.now,
    )?;

    if requires_gate(None, &order) {
        enforce_availability(state, &order)?;
    }

    let mut new_state: State = state.clone();
    new_state.orders.push(order.clone());

    Ok(transition(
        new_state,
        ChangedCollection::Orders,
        ctx,
        AuditAction::Create,
        (EntityType::Order, order.id.clone()),
        Changes::snapshot(&order),
        Outcome::Order(order),
    ))
}

fn update_order(
    state: &State,
    id: &str,
    patch: OrderPatch,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let current: &Order = state
        .order(id)
        .ok_or_else(|| DomainError::OrderNotFound(id.to_string()))?;
    let order: Order = patch_order(state, current, patch, ctx.now)?;

    if requires_gate(Some(current), &order) {
        enforce_availability(state, &order)?;
    }

    let mut new_state: State = state.clone();
    let slot: &mut Order = new_state
        .orders
        .iter_mut()
        .find(|stored| stored.id == id)
        .ok_or_else(|| DomainError::OrderNotFound(id.to_string()))?;
    *slot = order.clone();

    Ok(transition(
        new_state,
        ChangedCollection::Orders,
        ctx,
        AuditAction::Update,
        (EntityType::Order, id.to_string()),
        Changes::diff(current, &order),
        Outcome::Order(order),
    ))
}

fn delete_order(
    state: &State,
    id: &str,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let order: &Order = state
        .order(id)
        .ok_or_else(|| DomainError::OrderNotFound(id.to_string()))?;

    let mut new_state: State = state.clone();
    new_state.orders.retain(|stored| stored.id != id);

    Ok(transition(
        new_state,
        ChangedCollection::Orders,
        ctx,
        AuditAction::Delete,
        (EntityType::Order, id.to_string()),
        Changes::snapshot(order),
        Outcome::Deleted { id: id.to_string() },
    ))
}

fn create_client(
    state: &State,
    draft: ClientDraft,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    validate_name(&draft.full_name, "Client name")?;
    validate_cpf(&draft.cpf)?;
    validate_cpf_unique(&draft.cpf, &state.clients, None)?;
    let email: Option<String> = non_blank(draft.email);
    if let Some(email) = &email {
        validate_email(email)?;
    }

    let client = Client {
        id: ctx.new_id.clone(),
        full_name: draft.full_name,
        cpf: draft.cpf,
        phone: draft.phone,
        email,
        address: draft.address,
        birth_date: draft.birth_date,
        status: draft.status,
        notes: non_blank(draft.notes),
        total_spent: Money::ZERO,
        created_at: ctx.now,
        updated_at: ctx.now,
    };

    let mut new_state: State = state.clone();
    new_state.clients.push(client.clone());

    Ok(transition(
        new_state,
        ChangedCollection::Clients,
        ctx,
        AuditAction::Create,
        (EntityType::Client, client.id.clone()),
        Changes::snapshot(&client),
        Outcome::Client(client),
    ))
}

fn update_client(
    state: &State,
    id: &str,
    patch: ClientPatch,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let current: &Client = state
        .client(id)
        .ok_or_else(|| DomainError::ClientNotFound(id.to_string()))?;
    let mut client: Client = current.clone();

    if let Some(name) = patch.full_name {
        validate_name(&name, "Client name")?;
        client.full_name = name;
    }
    if let Some(cpf) = patch.cpf
        && digits_only(&cpf) != digits_only(&current.cpf)
    {
        validate_cpf(&cpf)?;
        validate_cpf_unique(&cpf, &state.clients, Some(id))?;
        client.cpf = cpf;
    }
    if let Some(phone) = patch.phone {
        client.phone = phone;
    }
    if let Some(email) = &patch.email
        && !email.trim().is_empty()
    {
        validate_email(email)?;
    }
    patch_text(&mut client.email, patch.email);
    if let Some(address) = patch.address {
        client.address = address;
    }
    if patch.birth_date.is_some() {
        client.birth_date = patch.birth_date;
    }
    if let Some(status) = patch.status {
        client.status = status;
    }
    patch_text(&mut client.notes, patch.notes);
    client.updated_at = ctx.now;

    let mut new_state: State = state.clone();
    let slot: &mut Client = new_state
        .clients
        .iter_mut()
        .find(|stored| stored.id == id)
        .ok_or_else(|| DomainError::ClientNotFound(id.to_string()))?;
    *slot = client.clone();

    Ok(transition(
        new_state,
        ChangedCollection::Clients,
        ctx,
        AuditAction::Update,
        (EntityType::Client, id.to_string()),
        Changes::diff(current, &client),
        Outcome::Client(client),
    ))
}

fn delete_client(
    state: &State,
    id: &str,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let client: &Client = state
        .client(id)
        .ok_or_else(|| DomainError::ClientNotFound(id.to_string()))?;

    let mut new_state: State = state.clone();
    new_state.clients.retain(|stored| stored.id != id);

    Ok(transition(
        new_state,
        ChangedCollection::Clients,
        ctx,
        AuditAction::Delete,
        (EntityType::Client, id.to_string()),
        Changes::snapshot(client),
        Outcome::Deleted { id: id.to_string() },
    ))
}

fn create_supplier(
    state: &State,
    draft: SupplierDraft,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    validate_name(&draft.name, "Supplier name")?;
    validate_cpf_or_cnpj(&draft.cpf_cnpj)?;

    let supplier = Supplier {
        id: ctx.new_id.clone(),
        name: draft.name,
        cpf_cnpj: draft.cpf_cnpj,
        contact: draft.contact,
        products_supplied: draft.products_supplied,
        notes: non_blank(draft.notes),
        created_at: ctx.now,
        updated_at: ctx.now,
    };

    let mut new_state: State = state.clone();
    new_state.suppliers.push(supplier.clone());

    Ok(transition(
        new_state,
        ChangedCollection::Suppliers,
        ctx,
        AuditAction::Create,
        (EntityType::Supplier, supplier.id.clone()),
        Changes::snapshot(&supplier),
        Outcome::Supplier(supplier),
    ))
}

fn delete_supplier(
    state: &State,
    id: &str,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let supplier: &Supplier = state
        .suppliers
        .iter()
        .find(|supplier| supplier.id == id)
        .ok_or_else(|| DomainError::SupplierNotFound(id.to_string()))?;

    let mut new_state: State = state.clone();
    new_state.suppliers.retain(|stored| stored.id != id);

    Ok(transition(
        new_state,
        ChangedCollection::Suppliers,
        ctx,
        AuditAction::Delete,
        (EntityType::Supplier, id.to_string()),
        Changes::snapshot(supplier),
        Outcome::Deleted { id: id.to_string() },
    ))
}

fn create_user(
    state: &State,
    draft: UserDraft,
    password_hash: String,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    validate_name(&draft.name, "User name")?;
    validate_email(&draft.email)?;
    validate_email_unique(&draft.email, &state.users, None)?;

    let user = User {
        id: ctx.new_id.clone(),
        name: draft.name,
        email: draft.email.trim().to_string(),
        role: draft.role,
        password_hash: Some(password_hash),
        created_at: ctx.now,
    };

    let mut new_state: State = state.clone();
    new_state.users.push(user.clone());

    Ok(transition(
        new_state,
        ChangedCollection::Users,
        ctx,
        AuditAction::Create,
        (EntityType::User, user.id.clone()),
        Changes::snapshot(&user.without_credentials()),
        Outcome::User(user),
    ))
}

fn update_user(
    state: &State,
    id: &str,
    patch: UserPatch,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let current: &User = state
        .user(id)
        .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
    let mut user: User = current.clone();

    if let Some(name) = patch.name {
        validate_name(&name, "User name")?;
        user.name = name;
    }
    if let Some(email) = patch.email {
        validate_email(&email)?;
        validate_email_unique(&email, &state.users, Some(id))?;
        user.email = email.trim().to_string();
    }
    if let Some(role) = patch.role {
        user.role = role;
    }

    let changes: Changes = Changes::diff(&current.without_credentials(), &user.without_credentials());
    store_user(state, user, changes, ctx)
}

fn set_password(
    state: &State,
    id: &str,
    password_hash: String,
    note: &str,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let mut user: User = state
        .user(id)
        .cloned()
        .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
    user.password_hash = Some(password_hash);

    store_user(state, user, Changes::Note(note.to_string()), ctx)
}

/// Writes an updated user over its stored version.
fn store_user(
    state: &State,
    user: User,
    changes: Changes,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let mut new_state: State = state.clone();
    let slot: &mut User = new_state
        .users
        .iter_mut()
        .find(|stored| stored.id == user.id)
        .ok_or_else(|| DomainError::UserNotFound(user.id.clone()))?;
    *slot = user.clone();

    Ok(transition(
        new_state,
        ChangedCollection::Users,
        ctx,
        AuditAction::Update,
        (EntityType::User, user.id.clone()),
        changes,
        Outcome::User(user),
    ))
}

fn delete_user(
    state: &State,
    id: &str,
    ctx: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    if ctx.actor.id == id {
        return Err(DomainError::CannotDeleteSelf.into());
    }
    let user: &User = state
        .user(id)
        .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;

    let mut new_state: State = state.clone();
    new_state.users.retain(|stored| stored.id != id);

    Ok(transition(
        new_state,
        ChangedCollection::Users,
        ctx,
        AuditAction::Delete,
        (EntityType::User, id.to_string()),
        Changes::snapshot(&user.without_credentials()),
        Outcome::Deleted { id: id.to_string() },
    ))
}

fn clear_catalog(state: &State, ctx: &TransitionContext) -> TransitionResult {
    let removed: usize = state.items.len();
    let mut new_state: State = state.clone();
    new_state.items.clear();

    transition(
        new_state,
        ChangedCollection::Items,
        ctx,
        AuditAction::DeleteAll,
        (EntityType::Item, ALL_ENTITIES.to_string()),
        Changes::Note(format!("Catalog cleared ({removed} items removed)")),
        Outcome::Cleared { removed },
    )
}

fn clear_orders(state: &State, ctx: &TransitionContext) -> TransitionResult {
    let removed: usize = state.orders.len();
    let mut new_state: State = state.clone();
    new_state.orders.clear();

    transition(
        new_state,
        ChangedCollection::Orders,
        ctx,
        AuditAction::DeleteAll,
        (EntityType::Order, ALL_ENTITIES.to_string()),
        Changes::Note(format!("Orders cleared ({removed} orders removed)")),
        Outcome::Cleared { removed },
    )
}
