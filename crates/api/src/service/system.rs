// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent::{Command, Outcome, State};
use partyrent_audit::{Actor, AuditEntry, EntityType};
use partyrent_domain::{Alert, compute_alerts};
use partyrent_persistence::{RecordStore, load_audit_log};

use super::{RentalService, unexpected_outcome};
use crate::clock::Clock;
use crate::error::ApiError;

impl<S: RecordStore> RentalService<S> {
    /// Empties the catalog. Returns how many items were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn clear_catalog(&mut self, actor: &Actor) -> Result<usize, ApiError> {
        match self.execute(actor, Command::ClearCatalog)? {
            Outcome::Cleared { removed } => Ok(removed),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Removes every order. Returns how many orders were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn clear_orders(&mut self, actor: &Actor) -> Result<usize, ApiError> {
        match self.execute(actor, Command::ClearOrders)? {
            Outcome::Cleared { removed } => Ok(removed),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// The audit log, oldest entry first.
    pub fn audit_entries(&mut self) -> Vec<AuditEntry> {
        load_audit_log(&mut self.store)
    }

    /// Audit entries for one entity, oldest first.
    pub fn audit_by_entity(&mut self, entity_type: EntityType, entity_id: &str) -> Vec<AuditEntry> {
        self.audit_entries()
            .into_iter()
            .filter(|entry| entry.concerns(entity_type, entity_id))
            .collect()
    }

    /// Low stock, late return and due-today alerts as of the service clock.
    pub fn alerts(&mut self) -> Vec<Alert> {
        let state: State = self.state();
        compute_alerts(&state.items, &state.orders, self.clock.today())
    }
}
