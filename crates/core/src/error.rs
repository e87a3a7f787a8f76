// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cmx_domain::{DomainError, EntityKind};

/// Errors that can occur while reading or mutating the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// No record of `kind` has the given id.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The entity family that was searched.
        kind: EntityKind,
        /// The id that did not match.
        id: String,
    },
    /// An import blob could not be parsed. The store is unchanged.
    #[error("Import failed: {reason}")]
    ImportFailed {
        /// The parser's description of the problem.
        reason: String,
    },
    /// The snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The key-value backend rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Builds a `NotFound` error.
    #[must_use]
    pub fn not_found(kind: EntityKind, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Wraps a storage backend error.
    pub fn storage<E: std::fmt::Display>(err: E) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
