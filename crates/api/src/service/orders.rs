// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent::{Command, OrderDraft, OrderPatch, Outcome};
use partyrent_audit::Actor;
use partyrent_domain::{DomainError, Order};
use partyrent_persistence::{Collection, RecordStore, load_records};
use tracing::info;

use super::{RentalService, unexpected_outcome};
use crate::error::{ApiError, translate_domain_error};

impl<S: RecordStore> RentalService<S> {
    /// Every order.
    pub fn list_orders(&mut self) -> Vec<Order> {
        load_records(&mut self.store, Collection::Orders)
    }

    /// Finds an order by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no order has this id.
    pub fn get_order(&mut self, id: &str) -> Result<Order, ApiError> {
        self.list_orders()
            .into_iter()
            .find(|order| order.id == id)
            .ok_or_else(|| translate_domain_error(DomainError::OrderNotFound(id.to_string())))
    }

    /// Orders placed by a client, newest first.
    pub fn orders_by_client(&mut self, client_id: &str) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .list_orders()
            .into_iter()
            .filter(|order| order.client_id == client_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Creates an order with the next `PED-` code.
    ///
    /// An order created in an active status must have both rental dates and
    /// enough free stock for every line.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for missing fields or dates and
    /// `ApiError::Conflict` when stock is insufficient.
    pub fn create_order(&mut self, actor: &Actor, draft: OrderDraft) -> Result<Order, ApiError> {
        match self.execute(actor, Command::CreateOrder(draft))? {
            Outcome::Order(order) => {
                info!(order_id = %order.id, code = %order.code, status = %order.status, "Order created");
                Ok(order)
            }
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Partially updates an order.
    ///
    /// Stock is re-checked whenever the update leaves the order active with
    /// a commitment it did not hold before. The order's own prior hold is
    /// not counted against it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown order, and the same
    /// errors as [`Self::create_order`] otherwise.
    pub fn update_order(
        &mut self,
        actor: &Actor,
        id: &str,
        patch: OrderPatch,
    ) -> Result<Order, ApiError> {
        let command: Command = Command::UpdateOrder {
            id: id.to_string(),
            patch,
        };
        match self.execute(actor, command)? {
            Outcome::Order(order) => Ok(order),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Deletes an order, releasing any stock it held.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown order.
    pub fn delete_order(&mut self, actor: &Actor, id: &str) -> Result<(), ApiError> {
        self.execute(actor, Command::DeleteOrder { id: id.to_string() })?;
        Ok(())
    }
}
