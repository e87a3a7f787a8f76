// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Sign-in only chooses who later actions are attributed to. Passwords are
//! stored and compared as plain text.

use cmx::{KeyValueStore, Store};
use cmx_domain::{Role, User};
use tracing::{info, warn};

use crate::error::{ApiError, AuthError};

/// The signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user's id.
    pub id: String,
    /// The user's display name.
    pub name: String,
    /// The role assigned to this user.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, name: String, role: Role) -> Self {
        Self { id, name, role }
    }

    /// Builds the actor for a stored user.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self::new(user.id.clone(), user.name.clone(), user.role)
    }

    /// Returns whether this actor holds the Admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authentication service for sign-in and sign-out.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Signs a user in by email and password.
    ///
    /// The email is matched case-insensitively after trimming. The password
    /// must equal the stored one exactly; a user without a password signs in
    /// with an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if no user matches the credentials or the session
    /// cannot be written.
    pub fn login<S: KeyValueStore>(
        store: &mut Store<S>,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let email: String = email.trim().to_lowercase();
        let user: User = store
            .users()
            .iter()
            .find(|user| {
                user.email.trim().to_lowercase() == email
                    && user.password.as_deref().unwrap_or_default() == password
            })
            .cloned()
            .ok_or_else(|| {
                warn!(email = %email, "Sign-in rejected");
                AuthError::AuthenticationFailed {
                    reason: String::from("Invalid email or password"),
                }
            })?;

        store
            .set_current_user(Some(&user.id))
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: e.to_string(),
            })?;

        info!(user = %user.name, role = %user.role, "User signed in");
        Ok(AuthenticatedActor::from_user(&user))
    }

    /// Signs the current user out.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be cleared.
    pub fn logout<S: KeyValueStore>(store: &mut Store<S>) -> Result<(), ApiError> {
        store.set_current_user(None)?;
        Ok(())
    }

    /// Returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if nobody is signed in.
    pub fn current_actor<S: KeyValueStore>(
        store: &Store<S>,
    ) -> Result<AuthenticatedActor, AuthError> {
        store
            .current_user()
            .map(AuthenticatedActor::from_user)
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Not signed in"),
            })
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from(Role::Admin.as_str()),
            })
        }
    }

    /// Checks if an actor may create, edit or delete staff accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_users(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_users")
    }

    /// Checks if an actor may replace the shop's data with an import.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_import(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "import_data")
    }

    /// Checks if an actor may delete customers, devices, tickets, invoices
    /// or appointments.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_delete(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        Self::require_admin(actor, action)
    }
}
