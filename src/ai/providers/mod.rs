//! AI provider abstraction layer.
//!
//! Defines the [`AiProvider`] trait and shared error/HTTP helpers used
//! by all provider implementations.
//!
//! Three providers are implemented:
//! - [`anthropic::AnthropicProvider`] — Anthropic `/v1/messages` API
//! - [`openai::OpenAiProvider`] — OpenAI `/v1/chat/completions` API
//! - [`google::GoogleProvider`] — Google `generateContent` API
//!
//! A provider turns a prepared prompt into the model's raw text reply;
//! interpreting that reply as a task suggestion happens one layer up.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod anthropic;
pub mod google;
pub mod openai;

/// Output token ceiling for every provider call (cost control).
pub const MAX_OUTPUT_TOKENS: u32 = 250;

/// Which AI backend to call, selected by the stored setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Anthropic messages API.
    Anthropic,
    /// OpenAI chat completions API.
    OpenAi,
    /// Google Generative Language API.
    Google,
}

impl ProviderKind {
    /// Parse a stored provider identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "anthropic" => Some(Self::Anthropic),
            "openai" => Some(Self::OpenAi),
            "google" => Some(Self::Google),
            _ => None,
        }
    }

    /// The lowercase identifier used in settings and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Google => "google",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by AI providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP transport failure.
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response did not match the expected schema.
    #[error("provider response parse error: {0}")]
    Parse(String),
    /// Upstream provider responded with an error status.
    #[error("provider returned non-success status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// HTTP helpers (shared by all providers)
// ---------------------------------------------------------------------------

/// Check HTTP response status and return body text or a structured error.
///
/// # Errors
///
/// Returns `ProviderError::Request` on transport failure,
/// `ProviderError::HttpStatus` on non-2xx.
pub async fn check_http_response(response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
            body: sanitize_http_error_body(&body),
        });
    }
    Ok(body)
}

fn sanitize_http_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sanitized = collapsed;
    for pattern in [
        r"sk-ant-[A-Za-z0-9_\-]{10,}",
        r"sk-[A-Za-z0-9]{32,}",
        r"AIza[A-Za-z0-9_\-]{20,}",
    ] {
        if let Ok(regex) = Regex::new(pattern) {
            sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
        }
    }

    const MAX_ERROR_BODY_CHARS: usize = 256;
    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Core AI provider interface.
///
/// Implementations must be `Send + Sync` so the suggestion client can be
/// shared across async task boundaries.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Send the prompt and return the model's raw text reply.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on API, network, or parse failure.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Short provider name for logging.
    fn name(&self) -> &'static str;
}

/// Construct the provider selected by the settings.
pub fn provider_for(kind: ProviderKind, model: &str, api_key: &str) -> Box<dyn AiProvider> {
    match kind {
        ProviderKind::Anthropic => Box::new(anthropic::AnthropicProvider::new(model, api_key)),
        ProviderKind::OpenAi => Box::new(openai::OpenAiProvider::new(model, api_key)),
        ProviderKind::Google => Box::new(google::GoogleProvider::new(model, api_key)),
    }
}
