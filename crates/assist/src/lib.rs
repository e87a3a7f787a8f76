// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! AI diagnostic suggestions for repair tickets.
//!
//! [`DiagnosticClient::suggest`] asks a generative model for likely causes
//! and next steps for a reported problem. It never fails: a missing key,
//! an unreachable service or an unreadable reply each produce a fixed
//! placeholder message instead.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod client;
mod config;
mod error;

#[cfg(test)]
mod tests;

pub use client::{
    DiagnosticClient, ERROR_MESSAGE, NOT_CONFIGURED_MESSAGE, NO_RESPONSE_MESSAGE, build_prompt,
};
pub use config::{
    API_KEY_VAR, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, DiagnosticConfig,
    ENDPOINT_VAR, MODEL_VAR, TIMEOUT_VAR,
};
pub use error::AssistError;
