//! AI suggestion client.
//!
//! Builds a provider-agnostic prompt from a task context and the user's
//! labels, calls one of three provider back ends, parses a constrained
//! JSON reply, and caches results. The whole layer degrades instead of
//! failing: every path terminates in either a valid suggestion or
//! `None` — transport errors, parse errors, and disabled settings all
//! log and surface as "no suggestion available". No retries; a failure
//! is terminal for that request and the caller may simply re-invoke.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AiSettings;
use crate::context::TaskContext;
use crate::labels::Label;

pub mod cache;
pub mod providers;

use cache::{cache_key, SuggestionCache};
use providers::{provider_for, AiProvider};

/// AI titles are cut to this many characters.
const TITLE_MAX_CHARS: usize = 100;

/// AI notes are cut to this many characters.
const NOTE_MAX_CHARS: usize = 500;

/// The metadata JSON dump embedded in the prompt is capped at this size.
const METADATA_DUMP_MAX_CHARS: usize = 500;

/// Priority as reported by the AI reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiPriority {
    /// No particular priority.
    #[default]
    None,
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl AiPriority {
    /// Parse a reply value, defaulting to [`AiPriority::None`] for
    /// anything outside the enumerated set.
    pub fn parse(s: &str) -> Self {
        match s {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::None,
        }
    }
}

/// A validated AI-generated task suggestion.
///
/// Produced only when a provider call succeeds and the reply parses as
/// the expected shape; there are no partial suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    /// Suggested task title (≤ 100 chars).
    pub title: String,
    /// Suggested estimate in milliseconds, when the reply carried a
    /// numeric estimate.
    pub time_estimate_ms: Option<u64>,
    /// Real user labels the reply named; invented names are dropped.
    pub suggested_labels: Vec<Label>,
    /// Suggested priority.
    pub priority: AiPriority,
    /// Short rationale note (≤ 500 chars).
    pub note: String,
    /// Always true; lets the popup distinguish AI from template output.
    pub is_ai_suggestion: bool,
    /// Whether this instance was served from the cache.
    #[serde(default)]
    pub from_cache: bool,
}

/// Build the provider-agnostic prompt for a context.
///
/// Embeds the platform, action, page title, a size-capped metadata
/// dump, and the user's existing label titles, and mandates a strict
/// JSON reply shape.
pub fn build_prompt(ctx: &TaskContext, labels: &[Label]) -> String {
    let page_title = ctx.metadata.title().unwrap_or("Unknown");
    let metadata_dump = truncate_chars(
        &serde_json::to_string(&ctx.metadata).unwrap_or_default(),
        METADATA_DUMP_MAX_CHARS,
    );
    let label_titles: Vec<&str> = labels.iter().map(|l| l.title.as_str()).collect();

    format!(
        "You are helping draft a task for a task manager.\n\
         Platform: {platform}\n\
         Detected action: {action}\n\
         Page title: {page_title}\n\
         Scraped metadata: {metadata_dump}\n\
         Existing labels: {labels}\n\
         \n\
         Reply with a single JSON object and nothing else, in exactly this shape:\n\
         {{\"title\": string, \"timeEstimate\": number (minutes), \
         \"suggestedLabels\": [string], \
         \"priority\": \"none\"|\"low\"|\"medium\"|\"high\", \"note\": string}}\n\
         Start the title with an action verb. Only use labels from the \
         existing labels list.",
        platform = ctx.platform,
        action = ctx.action,
        page_title = page_title,
        metadata_dump = metadata_dump,
        labels = label_titles.join(", "),
    )
}

/// Parse and validate a provider's raw text reply.
///
/// Extracts the first brace-delimited JSON substring (tolerating
/// markdown fencing), then validates and clamps every field. Any
/// malformed input — no braces, invalid JSON, missing or non-string
/// title — yields `None` for the whole suggestion, never a partial one.
pub fn parse_ai_response(raw: &str, user_labels: &[Label]) -> Option<AiSuggestion> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    let value: Value = serde_json::from_str(raw.get(start..=end)?).ok()?;

    let title = truncate_chars(value.get("title")?.as_str()?, TITLE_MAX_CHARS);

    // Minutes to milliseconds. Fractional minutes are fine; anything
    // non-numeric, negative, or non-finite stays absent.
    let time_estimate_ms = value
        .get("timeEstimate")
        .and_then(Value::as_f64)
        .filter(|minutes| minutes.is_finite() && *minutes >= 0.0)
        .map(minutes_to_ms);

    let priority = value
        .get("priority")
        .and_then(Value::as_str)
        .map(AiPriority::parse)
        .unwrap_or_default();

    let note = truncate_chars(
        value.get("note").and_then(Value::as_str).unwrap_or(""),
        NOTE_MAX_CHARS,
    );

    // Match label names case-insensitively against the user's real
    // labels; names the model invented are silently dropped.
    let suggested_labels = value
        .get("suggestedLabels")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|name| {
                    user_labels
                        .iter()
                        .find(|label| label.title.eq_ignore_ascii_case(name))
                        .cloned()
                })
                .collect()
        })
        .unwrap_or_default();

    Some(AiSuggestion {
        title,
        time_estimate_ms,
        suggested_labels,
        priority,
        note,
        is_ai_suggestion: true,
        from_cache: false,
    })
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Largest estimate the cast below can carry exactly (2^53 - 1 ms,
/// roughly 285,000 years).
const MAX_ESTIMATE_MS: f64 = 9_007_199_254_740_991.0;

// The caller filters out negative and non-finite values, and the clamp
// keeps the rounded result inside u64 range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn minutes_to_ms(minutes: f64) -> u64 {
    (minutes * 60_000.0).round().min(MAX_ESTIMATE_MS) as u64
}

/// The AI suggestion client: settings gate, cache, provider, parser.
pub struct SuggestionClient {
    settings: AiSettings,
    cache: SuggestionCache,
    provider: Box<dyn AiProvider>,
}

impl SuggestionClient {
    /// Client wired to the provider the settings select.
    pub fn from_settings(settings: AiSettings, cache: SuggestionCache) -> Self {
        let provider = provider_for(settings.provider, &settings.model, &settings.api_key);
        Self {
            settings,
            cache,
            provider,
        }
    }

    /// Client with an explicit provider (tests inject mocks here).
    pub fn with_provider(
        settings: AiSettings,
        cache: SuggestionCache,
        provider: Box<dyn AiProvider>,
    ) -> Self {
        Self {
            settings,
            cache,
            provider,
        }
    }

    /// Request an AI suggestion for a context.
    ///
    /// The dominant fast path — AI disabled or no API key — returns
    /// `None` without any network traffic. A valid cached entry
    /// short-circuits the provider call and comes back tagged
    /// `from_cache`. Otherwise: prompt, provider call, parse, and a
    /// write-through cache update. Every failure logs and yields `None`.
    pub async fn suggest(&self, ctx: &TaskContext, labels: &[Label]) -> Option<AiSuggestion> {
        if !self.settings.enabled || self.settings.api_key.is_empty() {
            debug!("ai suggestions disabled, skipping");
            return None;
        }

        let key = cache_key(ctx.platform, &ctx.source_url, &ctx.template_key);
        if self.settings.cache_enabled {
            if let Some(hit) = self.cache.get(&key) {
                debug!(key = %key, "ai suggestion served from cache");
                return Some(hit);
            }
        }

        let prompt = build_prompt(ctx, labels);
        let raw = match self.provider.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "ai provider call failed");
                return None;
            }
        };

        let suggestion = match parse_ai_response(&raw, labels) {
            Some(suggestion) => suggestion,
            None => {
                warn!(
                    provider = self.provider.name(),
                    "ai reply did not contain a valid suggestion"
                );
                return None;
            }
        };

        if self.settings.cache_enabled {
            self.cache.put(&key, &suggestion);
        }
        Some(suggestion)
    }
}
