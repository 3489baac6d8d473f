//! Context detection — maps a URL plus scraped metadata to a normalized
//! task suggestion.
//!
//! One pure classifier per platform, each a decision tree with a strict
//! precedence order, plus [`build_task_context`] which orchestrates
//! platform detection, classification, user estimate overrides, and
//! title generation. Nothing in this module performs I/O or errors:
//! absent metadata defaults, unknown template keys fall back to generic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metadata::SourceMetadata;
use crate::platform::Platform;
use crate::templates;
use crate::title;

pub mod github;
pub mod gmail;
pub mod jira;
pub mod slack;

/// What the suggested task asks the user to do.
///
/// Also the key for user-defined custom estimate overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Review someone else's pull request.
    Review,
    /// Fix failing CI checks on an own PR.
    FixPipeline,
    /// Address requested review changes on an own PR.
    AddressChanges,
    /// Merge an approved own PR.
    Merge,
    /// Follow up on an own PR with nothing actionable yet.
    FollowUp,
    /// Fix an issue.
    Fix,
    /// Reply to a message, comment, or email.
    Reply,
    /// Leave a new comment.
    Comment,
    /// Check a notification.
    Check,
    /// Work on a generic Jira issue.
    Task,
    /// Fix a Jira bug.
    Bug,
    /// Implement a Jira story.
    Story,
    /// Follow up on a Slack thread.
    Thread,
    /// Reply to a Slack direct message.
    Dm,
}

impl Action {
    /// Kebab-case identifier, matching the serde representation and the
    /// custom-estimate override keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::FixPipeline => "fix-pipeline",
            Self::AddressChanges => "address-changes",
            Self::Merge => "merge",
            Self::FollowUp => "follow-up",
            Self::Fix => "fix",
            Self::Reply => "reply",
            Self::Comment => "comment",
            Self::Check => "check",
            Self::Task => "task",
            Self::Bug => "bug",
            Self::Story => "story",
            Self::Thread => "thread",
            Self::Dm => "dm",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The partial result a platform classifier produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// What the task asks the user to do.
    pub action: Action,
    /// Template key for title generation.
    pub template_key: &'static str,
    /// Suggested time estimate, milliseconds.
    pub estimate_ms: u64,
    /// Suggested priority, 0-3.
    pub priority: u8,
    /// Keywords fed to the label suggester.
    pub label_keywords: Vec<String>,
}

impl Classification {
    /// Classification with table defaults for an action.
    fn for_action(action: Action, template_key: &'static str, keywords: &[&str]) -> Self {
        Self {
            action,
            template_key,
            estimate_ms: templates::default_estimate_ms(action),
            priority: templates::default_priority(action),
            label_keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
        }
    }
}

/// User preferences consumed by the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrefs {
    /// Custom per-action estimate overrides in milliseconds, keyed by
    /// [`Action::as_str`]. An entry replaces the suggested estimate
    /// entirely.
    #[serde(default)]
    pub custom_estimates_ms: HashMap<String, u64>,
}

/// The consolidated suggestion for one context request.
///
/// Constructed fresh per request and superseded by the next one; never
/// persisted. Field names follow the camelCase convention of the task
/// API payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskContext {
    /// Detected source platform.
    pub platform: Platform,
    /// What the task asks the user to do.
    pub action: Action,
    /// Template key that produced the title.
    pub template_key: String,
    /// Suggested time estimate, milliseconds.
    pub suggested_estimate_ms: u64,
    /// Suggested priority, 0-3.
    pub suggested_priority: u8,
    /// Keywords for the label suggester, in precedence order.
    pub label_keywords: Vec<String>,
    /// Rendered task title.
    pub suggested_title: String,
    /// Title wrapped as a markdown link to the source page.
    pub suggested_title_with_link: String,
    /// Echo of the parsed metadata for downstream consumers (AI prompts).
    pub metadata: SourceMetadata,
    /// The page URL the metadata was scraped from.
    pub source_url: String,
}

/// Dispatch to the platform's classifier.
fn classify(platform: Platform, source_url: &str, meta: &SourceMetadata) -> Classification {
    match (platform, meta) {
        (Platform::GitHub, SourceMetadata::GitHub(m)) => github::classify(source_url, m),
        (Platform::Jira, SourceMetadata::Jira(m)) => jira::classify(m),
        (Platform::Slack, SourceMetadata::Slack(m)) => slack::classify(m),
        (Platform::Gmail, SourceMetadata::Gmail(m)) => gmail::classify(m),
        _ => Classification::for_action(Action::Task, templates::GENERIC_TEMPLATE_KEY, &[]),
    }
}

/// Build the consolidated task suggestion for a page.
///
/// The sole synchronous entry point: detects the platform, parses the
/// raw scraped metadata into its typed shape, classifies, applies any
/// custom estimate override for the action, and renders both title
/// forms. Performs no network I/O and never errors.
pub fn build_task_context(source_url: &str, raw_metadata: Value, prefs: &UserPrefs) -> TaskContext {
    let platform = Platform::detect(source_url);
    let metadata = SourceMetadata::from_value(platform, raw_metadata);
    let mut classification = classify(platform, source_url, &metadata);

    if let Some(estimate) = prefs.custom_estimates_ms.get(classification.action.as_str()) {
        classification.estimate_ms = *estimate;
    }

    let suggested_title = title::generate_title(classification.template_key, &metadata);
    let suggested_title_with_link = title::generate_title_with_link(&suggested_title, source_url);

    TaskContext {
        platform,
        action: classification.action,
        template_key: classification.template_key.to_owned(),
        suggested_estimate_ms: classification.estimate_ms,
        suggested_priority: classification.priority,
        label_keywords: classification.label_keywords,
        suggested_title,
        suggested_title_with_link,
        metadata,
        source_url: source_url.to_owned(),
    }
}
