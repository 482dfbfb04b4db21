// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The collaborator-facing rental service.
//!
//! Every mutating operation follows the same path: load the current state
//! from the record store, apply a core command, save the one collection the
//! transition changed, then append its audit entry. Validation failures
//! leave the store untouched. A failed audit append does not roll back the
//! primary write; it is reported to the caller as a storage error.

mod clients;
mod items;
mod orders;
mod suppliers;
mod system;
mod users;

use partyrent::{Command, Outcome, State, TransitionContext, TransitionResult, apply};
use partyrent_audit::Actor;
use partyrent_persistence::{
    RecordStore, append_audit_entry, load_state, save_changed, try_load_state,
};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{ApiError, translate_core_error, translate_persistence_error};

/// The rental service over a record store.
pub struct RentalService<S> {
    store: S,
    clock: Box<dyn Clock + Send + Sync>,
    hash_cost: u32,
}

impl<S: RecordStore> RentalService<S> {
    /// Creates a service over a store using the system clock.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock<C: Clock + Send + Sync + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the bcrypt cost used for new password hashes.
    #[must_use]
    pub const fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// The underlying store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn state(&mut self) -> State {
        load_state(&mut self.store)
    }

    fn context(&self, actor: &Actor) -> TransitionContext {
        TransitionContext {
            actor: actor.clone(),
            now: self.clock.now(),
            new_id: Uuid::new_v4().to_string(),
            audit_id: Uuid::new_v4().to_string(),
        }
    }

    /// Applies a command and persists its result.
    ///
    /// Refuses to run when a stored record no longer decodes, since saving
    /// the result would drop that record.
    fn execute(&mut self, actor: &Actor, command: Command) -> Result<Outcome, ApiError> {
        let state: State = try_load_state(&mut self.store).map_err(|e| {
            error!(error = %e, "Refusing to write over undecodable records");
            translate_persistence_error(e)
        })?;
        let ctx: TransitionContext = self.context(actor);

        let result: TransitionResult =
            apply(&state, command, &ctx).map_err(translate_core_error)?;

        save_changed(&mut self.store, &result.new_state, result.changed).map_err(|e| {
            error!(error = %e, "Failed to save collection");
            translate_persistence_error(e)
        })?;

        append_audit_entry(&mut self.store, &result.audit_entry).map_err(|e| {
            error!(
                audit_id = %result.audit_entry.id,
                error = %e,
                "Primary write saved but audit entry was not"
            );
            translate_persistence_error(e)
        })?;

        info!(
            actor = %actor.id,
            action = %result.audit_entry.action,
            entity_type = %result.audit_entry.entity_type,
            entity_id = %result.audit_entry.entity_id,
            "Applied command"
        );
        debug!(changed = ?result.changed, "Saved collection");

        Ok(result.outcome)
    }
}

fn unexpected_outcome(outcome: &Outcome) -> ApiError {
    ApiError::Storage {
        message: format!("Unexpected transition outcome: {outcome:?}"),
    }
}
