// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diagnostic client configuration.

use std::time::Duration;
use tracing::warn;

/// Environment variable holding the service credential.
pub const API_KEY_VAR: &str = "API_KEY";
/// Environment variable overriding the model name.
pub const MODEL_VAR: &str = "CMX_AI_MODEL";
/// Environment variable overriding the service base URL.
pub const ENDPOINT_VAR: &str = "CMX_AI_ENDPOINT";
/// Environment variable overriding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "CMX_AI_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`crate::DiagnosticClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Service credential. Empty means the assistant is switched off.
    pub api_key: String,
    pub model: String,
    /// Base URL, without a trailing slash.
    pub endpoint: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for DiagnosticConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::from(DEFAULT_MODEL),
            endpoint: String::from(DEFAULT_ENDPOINT),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DiagnosticConfig {
    /// Creates a configuration with the given key and default settings.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// Unset or blank variables fall back to the defaults. An unparseable
    /// timeout is logged and ignored.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| -> Option<String> {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults: Self = Self::default();
        let timeout: Duration = match read(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "Ignoring invalid {TIMEOUT_VAR}");
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            api_key: read(API_KEY_VAR).unwrap_or_default(),
            model: read(MODEL_VAR).unwrap_or(defaults.model),
            endpoint: read(ENDPOINT_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.endpoint),
            timeout,
        }
    }

    /// Returns whether a credential is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
