//! Anthropic provider implementation using the `/v1/messages` API.

use serde::{Deserialize, Serialize};

use super::{check_http_response, AiProvider, ProviderError, MAX_OUTPUT_TOKENS};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// Anthropic messages API request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Conversation messages.
    pub messages: Vec<AnthropicMessage>,
}

/// A message in Anthropic format.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct AnthropicMessage {
    /// Role: always "user" here.
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// Anthropic API response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    /// Content blocks in the response.
    pub content: Vec<AnthropicContentBlock>,
}

/// A content block in the Anthropic response.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct AnthropicContentBlock {
    /// Block text.
    pub text: String,
}

// ---------------------------------------------------------------------------
// Request / Response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build an Anthropic API request for a single-turn prompt.
#[doc(hidden)]
pub fn build_request(model: &str, prompt: &str) -> AnthropicRequest {
    AnthropicRequest {
        model: model.to_owned(),
        max_tokens: MAX_OUTPUT_TOKENS,
        messages: vec![AnthropicMessage {
            role: "user".to_owned(),
            content: prompt.to_owned(),
        }],
    }
}

/// Extract the reply text from an Anthropic API response body.
///
/// The reply lives at `content[0].text`.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the body cannot be deserialized or
/// contains no content blocks.
#[doc(hidden)]
pub fn parse_reply(body: &str) -> Result<String, ProviderError> {
    let resp: AnthropicResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
    resp.content
        .into_iter()
        .next()
        .map(|block| block.text)
        .ok_or_else(|| ProviderError::Parse("missing content[0]".to_owned()))
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Anthropic messages API provider.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider instance.
    pub fn new(model: &str, api_key: &str) -> Self {
        Self {
            model: model.to_owned(),
            api_key: api_key.to_owned(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl AiProvider for AnthropicProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_request = build_request(&self.model, prompt);

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&api_request)
            .send()
            .await?;

        let payload = check_http_response(response).await?;
        parse_reply(&payload)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}
