// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent::{Command, Outcome, SupplierDraft};
use partyrent_audit::Actor;
use partyrent_domain::{DomainError, Supplier};
use partyrent_persistence::{Collection, RecordStore, load_records};

use super::{RentalService, unexpected_outcome};
use crate::error::{ApiError, translate_domain_error};

impl<S: RecordStore> RentalService<S> {
    pub fn list_suppliers(&mut self) -> Vec<Supplier> {
        load_records(&mut self.store, Collection::Suppliers)
    }

    /// Finds a supplier by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no supplier has this id.
    pub fn get_supplier(&mut self, id: &str) -> Result<Supplier, ApiError> {
        self.list_suppliers()
            .into_iter()
            .find(|supplier| supplier.id == id)
            .ok_or_else(|| translate_domain_error(DomainError::SupplierNotFound(id.to_string())))
    }

    /// Registers a supplier.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a missing name or a document that
    /// is neither a valid CPF nor a valid CNPJ.
    pub fn create_supplier(
        &mut self,
        actor: &Actor,
        draft: SupplierDraft,
    ) -> Result<Supplier, ApiError> {
        match self.execute(actor, Command::CreateSupplier(draft))? {
            Outcome::Supplier(supplier) => Ok(supplier),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Deletes a supplier.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown supplier.
    pub fn delete_supplier(&mut self, actor: &Actor, id: &str) -> Result<(), ApiError> {
        self.execute(actor, Command::DeleteSupplier { id: id.to_string() })?;
        Ok(())
    }
}
