//! Google provider implementation using the Generative Language
//! `generateContent` API.

use serde::{Deserialize, Serialize};

use super::{check_http_response, AiProvider, ProviderError, MAX_OUTPUT_TOKENS};

const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// Google generateContent API request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRequest {
    /// Prompt contents.
    pub contents: Vec<GoogleContent>,
    /// Generation parameters.
    pub generation_config: GoogleGenerationConfig,
}

/// A content entry holding prompt parts.
#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleContent {
    /// Text parts.
    pub parts: Vec<GooglePart>,
}

/// A single text part.
#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
pub struct GooglePart {
    /// The text content.
    pub text: String,
}

/// Generation parameters.
#[doc(hidden)]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleGenerationConfig {
    /// Maximum output tokens.
    pub max_output_tokens: u32,
}

/// Google generateContent API response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    /// Response candidates.
    pub candidates: Vec<GoogleCandidate>,
}

/// A response candidate.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct GoogleCandidate {
    /// Candidate content.
    pub content: GoogleContent,
}

// ---------------------------------------------------------------------------
// Request / Response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build a Google API request for a single-turn prompt.
#[doc(hidden)]
pub fn build_request(prompt: &str) -> GoogleRequest {
    GoogleRequest {
        contents: vec![GoogleContent {
            parts: vec![GooglePart {
                text: prompt.to_owned(),
            }],
        }],
        generation_config: GoogleGenerationConfig {
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}

/// The request URL for a model; the API key travels as a query parameter.
#[doc(hidden)]
pub fn request_url(model: &str, api_key: &str) -> String {
    format!("{GOOGLE_API_BASE}/{model}:generateContent?key={api_key}")
}

/// Extract the reply text from a Google API response body.
///
/// The reply lives at `candidates[0].content.parts[0].text`.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the body cannot be deserialized or
/// the first candidate has no parts.
#[doc(hidden)]
pub fn parse_reply(body: &str) -> Result<String, ProviderError> {
    let resp: GoogleResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
    resp.candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| {
            ProviderError::Parse("missing candidates[0].content.parts[0]".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Google Generative Language API provider.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GoogleProvider {
    /// Create a new Google provider instance.
    pub fn new(model: &str, api_key: &str) -> Self {
        Self {
            model: model.to_owned(),
            api_key: api_key.to_owned(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl AiProvider for GoogleProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_request = build_request(prompt);

        let response = self
            .client
            .post(request_url(&self.model, &self.api_key))
            .header("content-type", "application/json")
            .json(&api_request)
            .send()
            .await?;

        let payload = check_http_response(response).await?;
        parse_reply(&payload)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
