// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for gating front-end actions.
//!
//! Capabilities tell a front end what to offer. They are advisory only and
//! do not replace the checks in the handlers.

use cmx_domain::{Role, User};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::request_response::{Capability, GlobalCapabilities, UserCapabilities};

/// Computes global capabilities for the signed-in user.
#[must_use]
pub fn compute_global_capabilities(actor: &AuthenticatedActor) -> GlobalCapabilities {
    GlobalCapabilities {
        can_manage_users: Capability::from_bool(
            AuthorizationService::authorize_manage_users(actor).is_ok(),
        ),
        can_import_data: Capability::from_bool(AuthorizationService::authorize_import(actor).is_ok()),
        can_delete_records: Capability::from_bool(
            AuthorizationService::authorize_delete(actor, "delete_record").is_ok(),
        ),
    }
}

/// Returns whether `target` is the only Admin among `users`.
#[must_use]
pub fn is_last_admin(target: &User, users: &[User]) -> bool {
    target.role == Role::Admin && users.iter().filter(|u| u.role == Role::Admin).count() <= 1
}

/// Computes what `actor` may do to one staff account.
///
/// Only Admins may change accounts. An Admin may not delete their own
/// account, and the last Admin can be neither deleted nor demoted.
#[must_use]
pub fn compute_user_capabilities(
    actor: &AuthenticatedActor,
    target: &User,
    users: &[User],
) -> UserCapabilities {
    if !actor.is_admin() {
        return UserCapabilities {
            can_edit: Capability::Denied,
            can_change_role: Capability::Denied,
            can_delete: Capability::Denied,
        };
    }

    let last_admin: bool = is_last_admin(target, users);
    let is_self: bool = target.id == actor.id;

    UserCapabilities {
        can_edit: Capability::Allowed,
        can_change_role: Capability::from_bool(!last_admin),
        can_delete: Capability::from_bool(!last_admin && !is_self),
    }
}
