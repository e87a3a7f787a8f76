// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use uuid::Uuid;

/// Prefix for ticket log entry ids.
pub(crate) const LOG_ID_PREFIX: &str = "l";

/// Prefix for invoice line item ids.
pub(crate) const LINE_ITEM_ID_PREFIX: &str = "li";

/// Generates a `<prefix>-<uuid>` id.
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}
