// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Gemini `generateContent` client.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::DiagnosticConfig;
use crate::error::AssistError;

/// Returned when no credential is configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "AI Key not configured.";
/// Returned when the service replies without any text.
pub const NO_RESPONSE_MESSAGE: &str = "No response from AI.";
/// Returned when the request fails for any reason.
pub const ERROR_MESSAGE: &str = "Error getting AI diagnostic.";

/// Builds the technician prompt for a problem report.
#[must_use]
pub fn build_prompt(description: &str, device_type: &str) -> String {
    format!(
        "You are an expert computer repair technician. Analyze this repair issue for a \
         {device_type}: \"{description}\". Provide 3 likely causes and suggested next steps \
         for the technician. Keep it concise and professional."
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Joins the text parts of the first candidate. Blank text counts as none.
    pub(crate) fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Client for diagnostic suggestions.
#[derive(Debug, Clone)]
pub struct DiagnosticClient {
    config: DiagnosticConfig,
    http: Client,
}

impl DiagnosticClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: DiagnosticConfig) -> Result<Self, AssistError> {
        let http: Client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// Creates a client from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, AssistError> {
        Self::new(DiagnosticConfig::from_env())
    }

    #[must_use]
    pub const fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Suggests likely causes and next steps for a repair problem.
    ///
    /// Always returns text. Without a credential no request is made.
    pub async fn suggest(&self, description: &str, device_type: &str) -> String {
        if !self.config.is_configured() {
            return String::from(NOT_CONFIGURED_MESSAGE);
        }

        let prompt: String = build_prompt(description, device_type);
        match self.generate(&prompt).await {
            Ok(Some(text)) => {
                info!(model = %self.config.model, "Diagnostic suggestion received");
                text
            }
            Ok(None) => String::from(NO_RESPONSE_MESSAGE),
            Err(e) => {
                error!(error = %e, "Diagnostic request failed");
                String::from(ERROR_MESSAGE)
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, AssistError> {
        let url: String = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );
        debug!(url = %url, "Sending diagnostic request");

        let response: reqwest::Response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&GenerateRequest {
                contents: [Content {
                    parts: [RequestPart { text: prompt }],
                }],
            })
            .send()
            .await?;

        let status: reqwest::StatusCode = response.status();
        let body: String = response.text().await?;
        if !status.is_success() {
            return Err(AssistError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = serde_json::from_str(&body)?;
        Ok(reply.text())
    }
}
