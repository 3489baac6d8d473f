//! OpenAI provider implementation using the `/v1/chat/completions` API.

use serde::{Deserialize, Serialize};

use super::{check_http_response, AiProvider, ProviderError, MAX_OUTPUT_TOKENS};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// OpenAI chat completions API request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct OpenAiRequest {
    /// Model identifier.
    pub model: String,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Conversation messages.
    pub messages: Vec<OpenAiMessage>,
}

/// A message in OpenAI chat format.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct OpenAiMessage {
    /// Role: always "user" here.
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// OpenAI chat completions API response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OpenAiResponse {
    /// Response choices.
    pub choices: Vec<OpenAiChoice>,
}

/// A response choice from OpenAI.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OpenAiChoice {
    /// Assistant message for this choice.
    pub message: OpenAiResponseMessage,
}

/// Assistant message from OpenAI.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OpenAiResponseMessage {
    /// Optional text content.
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// Request / Response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build an OpenAI API request for a single-turn prompt.
#[doc(hidden)]
pub fn build_request(model: &str, prompt: &str) -> OpenAiRequest {
    OpenAiRequest {
        model: model.to_owned(),
        max_tokens: MAX_OUTPUT_TOKENS,
        messages: vec![OpenAiMessage {
            role: "user".to_owned(),
            content: prompt.to_owned(),
        }],
    }
}

/// Extract the reply text from an OpenAI API response body.
///
/// The reply lives at `choices[0].message.content`.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the body cannot be deserialized or
/// the first choice has no text content.
#[doc(hidden)]
pub fn parse_reply(body: &str) -> Result<String, ProviderError> {
    let resp: OpenAiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
    resp.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::Parse("missing choices[0].message.content".to_owned()))
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// OpenAI chat completions API provider.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance.
    pub fn new(model: &str, api_key: &str) -> Self {
        Self {
            model: model.to_owned(),
            api_key: api_key.to_owned(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl AiProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_request = build_request(&self.model, prompt);

        let response = self
            .client
            .post(OPENAI_API_URL)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&api_request)
            .send()
            .await?;

        let payload = check_http_response(response).await?;
        parse_reply(&payload)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
