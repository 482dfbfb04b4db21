// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent::{ClientDraft, ClientPatch, Command, Outcome};
use partyrent_audit::Actor;
use partyrent_domain::{Client, DomainError, Money, Order, digits_only};
use partyrent_persistence::{Collection, RecordStore, load_records};

use super::{RentalService, unexpected_outcome};
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::ClientHistory;

impl<S: RecordStore> RentalService<S> {
    /// Every client.
    pub fn list_clients(&mut self) -> Vec<Client> {
        load_records(&mut self.store, Collection::Clients)
    }

    /// Finds a client by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no client has this id.
    pub fn get_client(&mut self, id: &str) -> Result<Client, ApiError> {
        self.list_clients()
            .into_iter()
            .find(|client| client.id == id)
            .ok_or_else(|| translate_domain_error(DomainError::ClientNotFound(id.to_string())))
    }

    /// Finds a client by CPF, comparing digits only.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no client has this CPF.
    pub fn get_client_by_cpf(&mut self, cpf: &str) -> Result<Client, ApiError> {
        let wanted: String = digits_only(cpf);
        self.list_clients()
            .into_iter()
            .find(|client| !wanted.is_empty() && digits_only(&client.cpf) == wanted)
            .ok_or_else(|| translate_domain_error(DomainError::ClientNotFound(cpf.to_string())))
    }

    /// Clients whose name, CPF, phone or email contains `query`.
    ///
    /// Text matches ignore case. CPF and phone also match on digits only.
    pub fn search_clients(&mut self, query: &str) -> Vec<Client> {
        let needle: String = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.list_clients();
        }
        let digits: String = digits_only(&needle);

        self.list_clients()
            .into_iter()
            .filter(|client| {
                let text_match: bool = client.full_name.to_lowercase().contains(&needle)
                    || client.cpf.to_lowercase().contains(&needle)
                    || client.phone.to_lowercase().contains(&needle)
                    || client
                        .email
                        .as_deref()
                        .is_some_and(|email| email.to_lowercase().contains(&needle));
                let digit_match: bool = !digits.is_empty()
                    && (digits_only(&client.cpf).contains(&digits)
                        || digits_only(&client.phone).contains(&digits));
                text_match || digit_match
            })
            .collect()
    }

    /// Registers a client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid CPF and
    /// `ApiError::Conflict` if the CPF is already registered.
    pub fn create_client(&mut self, actor: &Actor, draft: ClientDraft) -> Result<Client, ApiError> {
        match self.execute(actor, Command::CreateClient(draft))? {
            Outcome::Client(client) => Ok(client),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Partially updates a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client does not exist, a changed CPF is
    /// invalid or taken, or the write fails.
    pub fn update_client(
        &mut self,
        actor: &Actor,
        id: &str,
        patch: ClientPatch,
    ) -> Result<Client, ApiError> {
        let command: Command = Command::UpdateClient {
            id: id.to_string(),
            patch,
        };
        match self.execute(actor, command)? {
            Outcome::Client(client) => Ok(client),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Deletes a client. Their orders keep the copied client name.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown client.
    pub fn delete_client(&mut self, actor: &Actor, id: &str) -> Result<(), ApiError> {
        self.execute(actor, Command::DeleteClient { id: id.to_string() })?;
        Ok(())
    }

    /// A client's orders and what they have spent.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown client.
    pub fn client_history(&mut self, client_id: &str) -> Result<ClientHistory, ApiError> {
        let client: Client = self.get_client(client_id)?;
        let orders: Vec<Order> = self.orders_by_client(client_id);
        let total_spent: Money = orders
            .iter()
            .filter(|order| order.status.is_paid())
            .map(|order| order.total_value)
            .sum();

        Ok(ClientHistory {
            client,
            order_count: orders.len(),
            orders,
            total_spent,
        })
    }
}
