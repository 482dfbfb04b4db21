// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent::{Command, ItemDraft, ItemPatch, Outcome};
use partyrent_audit::Actor;
use partyrent_domain::{
    AvailabilityResult, DateRange, DomainError, Item, availability_for, calculate_availability,
    list_available,
};
use partyrent_persistence::{Collection, RecordStore, load_records};
use time::Date;

use super::{RentalService, unexpected_outcome};
use crate::error::{ApiError, translate_domain_error};

impl<S: RecordStore> RentalService<S> {
    /// Every catalog item.
    pub fn list_items(&mut self) -> Vec<Item> {
        load_records(&mut self.store, Collection::Items)
    }

    /// Finds an item by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no item has this id.
    pub fn get_item(&mut self, id: &str) -> Result<Item, ApiError> {
        self.list_items()
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| translate_domain_error(DomainError::ItemNotFound(id.to_string())))
    }

    /// Finds an item by its human code, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no item has this code.
    pub fn get_item_by_code(&mut self, code: &str) -> Result<Item, ApiError> {
        self.list_items()
            .into_iter()
            .find(|item| item.code.eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| translate_domain_error(DomainError::ItemNotFound(code.to_string())))
    }

    /// Adds an item to the catalog with the next `CAD-` code.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub fn create_item(&mut self, actor: &Actor, draft: ItemDraft) -> Result<Item, ApiError> {
        match self.execute(actor, Command::CreateItem(draft))? {
            Outcome::Item(item) => Ok(item),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Partially updates an item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist, validation fails, or
    /// the write fails.
    pub fn update_item(
        &mut self,
        actor: &Actor,
        id: &str,
        patch: ItemPatch,
    ) -> Result<Item, ApiError> {
        let command: Command = Command::UpdateItem {
            id: id.to_string(),
            patch,
        };
        match self.execute(actor, command)? {
            Outcome::Item(item) => Ok(item),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Adds `delta` owned units to an item. Negative deltas remove units.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the owned quantity would become
    /// negative or drop below the units in maintenance.
    pub fn adjust_item_quantity(
        &mut self,
        actor: &Actor,
        id: &str,
        delta: i64,
    ) -> Result<Item, ApiError> {
        let command: Command = Command::AdjustItemQuantity {
            id: id.to_string(),
            delta,
        };
        match self.execute(actor, command)? {
            Outcome::Item(item) => Ok(item),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Deletes an item no active order references.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` if an active order books the item.
    pub fn delete_item(&mut self, actor: &Actor, id: &str) -> Result<(), ApiError> {
        self.execute(actor, Command::DeleteItem { id: id.to_string() })?;
        Ok(())
    }

    /// Units of an item free for booking between `start` and `end`,
    /// both inclusive. Unknown items have no availability.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if `end` is before `start`.
    pub fn item_availability(
        &mut self,
        item_id: &str,
        start: Date,
        end: Date,
    ) -> Result<u32, ApiError> {
        let range: DateRange = DateRange::new(start, end).map_err(translate_domain_error)?;
        let state = self.state();
        Ok(availability_for(&state.items, &state.orders, item_id, &range))
    }

    /// The full availability computation for one item.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown item and
    /// `ApiError::Validation` if `end` is before `start`.
    pub fn item_availability_breakdown(
        &mut self,
        item_id: &str,
        start: Date,
        end: Date,
    ) -> Result<AvailabilityResult, ApiError> {
        let range: DateRange = DateRange::new(start, end).map_err(translate_domain_error)?;
        let state = self.state();
        let item: &Item = state
            .item(item_id)
            .ok_or_else(|| translate_domain_error(DomainError::ItemNotFound(item_id.to_string())))?;
        Ok(calculate_availability(item, &state.orders, &range, None))
    }

    /// Items with at least one unit free between `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if `end` is before `start`.
    pub fn list_available_items(&mut self, start: Date, end: Date) -> Result<Vec<Item>, ApiError> {
        let range: DateRange = DateRange::new(start, end).map_err(translate_domain_error)?;
        let state = self.state();
        Ok(list_available(&state.items, &state.orders, &range)
            .into_iter()
            .cloned()
            .collect())
    }
}
