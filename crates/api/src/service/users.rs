// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use partyrent::{Command, Outcome, UserDraft, UserPatch};
use partyrent_audit::Actor;
use partyrent_domain::{DomainError, User};
use partyrent_persistence::{Collection, RecordStore, load_records};
use tracing::{info, warn};

use super::{RentalService, unexpected_outcome};
use crate::credentials::{hash_password, verify_password};
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{ChangePasswordRequest, CreateUserRequest};

impl<S: RecordStore> RentalService<S> {
    /// Stored users, credentials included. Never handed out.
    fn stored_users(&mut self) -> Vec<User> {
        load_records(&mut self.store, Collection::Users)
    }

    fn stored_user(&mut self, id: &str) -> Result<User, ApiError> {
        self.stored_users()
            .into_iter()
            .find(|user| user.id == id)
            .ok_or_else(|| translate_domain_error(DomainError::UserNotFound(id.to_string())))
    }

    /// Every user, without credentials.
    pub fn list_users(&mut self) -> Vec<User> {
        self.stored_users()
            .iter()
            .map(User::without_credentials)
            .collect()
    }

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no user has this id.
    pub fn get_user(&mut self, id: &str) -> Result<User, ApiError> {
        Ok(self.stored_user(id)?.without_credentials())
    }

    /// Finds a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no user has this email.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<User, ApiError> {
        self.stored_users()
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email.trim()))
            .map(|user| user.without_credentials())
            .ok_or_else(|| translate_domain_error(DomainError::UserNotFound(email.to_string())))
    }

    /// Creates a user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a short password or malformed
    /// fields and `ApiError::Conflict` if the email is taken.
    pub fn create_user(
        &mut self,
        actor: &Actor,
        request: CreateUserRequest,
    ) -> Result<User, ApiError> {
        let password_hash: String = hash_password(&request.password, self.hash_cost)?;
        let command: Command = Command::CreateUser {
            draft: UserDraft {
                name: request.name,
                email: request.email,
                role: request.role,
            },
            password_hash,
        };
        match self.execute(actor, command)? {
            Outcome::User(user) => Ok(user.without_credentials()),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Partially updates a user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist, a changed email is
    /// malformed or taken, or the write fails.
    pub fn update_user(
        &mut self,
        actor: &Actor,
        id: &str,
        patch: UserPatch,
    ) -> Result<User, ApiError> {
        let command: Command = Command::UpdateUser {
            id: id.to_string(),
            patch,
        };
        match self.execute(actor, command)? {
            Outcome::User(user) => Ok(user.without_credentials()),
            other => Err(unexpected_outcome(&other)),
        }
    }

    /// Deletes a user other than the actor.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` when actors try to delete themselves.
    pub fn delete_user(&mut self, actor: &Actor, id: &str) -> Result<(), ApiError> {
        self.execute(actor, Command::DeleteUser { id: id.to_string() })?;
        Ok(())
    }

    /// Replaces a password after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the current password does not
    /// verify or the new one is too short.
    pub fn change_password(
        &mut self,
        actor: &Actor,
        id: &str,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        let user: User = self.stored_user(id)?;
        if !verify_password(&request.current_password, user.password_hash.as_deref()) {
            warn!(user_id = %id, "Password change rejected");
            return Err(translate_domain_error(DomainError::IncorrectPassword));
        }
        let password_hash: String = hash_password(&request.new_password, self.hash_cost)?;
        self.execute(
            actor,
            Command::ChangePassword {
                id: id.to_string(),
                password_hash,
            },
        )?;
        Ok(())
    }

    /// Replaces any user's password. Admin only.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` when the actor is not an admin and
    /// `ApiError::Validation` if the new password is too short.
    pub fn reset_password(
        &mut self,
        actor: &Actor,
        id: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        // Non-admins are turned away before any hashing work.
        if !actor.is_admin() {
            warn!(actor = %actor.id, user_id = %id, "Password reset denied");
            return Err(translate_domain_error(DomainError::AdminRequired {
                action: "reset passwords",
            }));
        }
        let password_hash: String = hash_password(new_password, self.hash_cost)?;
        self.execute(
            actor,
            Command::ResetPassword {
                id: id.to_string(),
                password_hash,
            },
        )?;
        info!(user_id = %id, admin = %actor.id, "Password reset");
        Ok(())
    }

    /// Returns the user whose email and password match.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an unknown email or wrong password,
    /// without saying which.
    pub fn verify_login(&mut self, email: &str, password: &str) -> Result<User, ApiError> {
        let user: Option<User> = self
            .stored_users()
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email.trim()));

        match user {
            Some(user) if verify_password(password, user.password_hash.as_deref()) => {
                info!(user_id = %user.id, "Login verified");
                Ok(user.without_credentials())
            }
            _ => {
                warn!("Login rejected");
                Err(ApiError::Validation {
                    field: String::from("credentials"),
                    message: String::from("Invalid email or password"),
                })
            }
        }
    }
}
