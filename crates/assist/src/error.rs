// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Failures talking to the diagnostic service.
///
/// These never reach callers of [`crate::DiagnosticClient::suggest`]; they
/// are logged and replaced by a placeholder message.
#[derive(Debug, Error)]
pub enum AssistError {
    /// The HTTP client could not be built or the request failed in transit.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The reply body was not the expected JSON.
    #[error("Could not decode reply: {0}")]
    Decode(#[from] serde_json::Error),
}
