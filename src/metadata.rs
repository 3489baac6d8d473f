//! Typed per-platform page metadata.
//!
//! Content scrapers emit a platform-specific JSON object. Rather than a
//! loose bag of fields, each platform gets its own struct so classifier
//! field access is checked at compile time. Every field carries a serde
//! default: missing scraped fields silently default, never an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::platform::Platform;

/// Metadata scraped from a GitHub pull request, issue, comment, or
/// notification page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubMetadata {
    /// Page kind hint from the scraper ("pr", "comment", ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Pull request number, when on a PR page.
    pub pr_number: Option<u64>,
    /// Issue number, when on an issue page.
    pub issue_number: Option<u64>,
    /// Pull request title.
    pub pr_title: String,
    /// Generic page title (issues, notifications).
    pub title: String,
    /// Author login of the PR, issue, or comment.
    pub author: String,
    /// Whether the current user authored the PR.
    #[serde(rename = "isOwnPR")]
    pub is_own_pr: bool,
    /// CI check rollup ("failing", "passing", or empty).
    pub check_status: String,
    /// Review rollup ("changes_requested", "approved", or empty).
    pub review_status: String,
    /// What a comment is attached to ("pr" or "issue").
    pub context_type: String,
    /// Notification reason ("review_requested", "mention", ...).
    pub reason: String,
}

/// Metadata scraped from a Jira issue page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JiraMetadata {
    /// Issue key, e.g. "ABC-123".
    pub issue_key: String,
    /// Issue summary line.
    pub summary: String,
    /// Issue type name ("Bug", "Story", "Epic", ...).
    pub issue_type: String,
    /// Priority name ("Highest", "High", "Medium", ...).
    pub priority: String,
}

/// Metadata scraped from a Slack message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlackMetadata {
    /// Channel display name (contains "Direct message" for DMs).
    pub channel_name: String,
    /// Sender display name.
    pub sender_name: String,
    /// Message body text.
    pub message_text: String,
    /// Whether the message sits in a thread.
    pub is_thread: bool,
    /// Whether the conversation is a direct message.
    #[serde(rename = "isDM")]
    pub is_dm: bool,
}

/// Metadata scraped from a Gmail message view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GmailMetadata {
    /// Email subject line.
    pub email_subject: String,
    /// Sender display name.
    pub sender_name: String,
}

/// Scraped metadata, tagged by the platform it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum SourceMetadata {
    /// GitHub page metadata.
    GitHub(GitHubMetadata),
    /// Jira issue metadata.
    Jira(JiraMetadata),
    /// Slack message metadata.
    Slack(SlackMetadata),
    /// Gmail message metadata.
    Gmail(GmailMetadata),
    /// No usable metadata.
    #[default]
    None,
}

impl SourceMetadata {
    /// Parse a raw scraped JSON object into the platform's typed shape.
    ///
    /// Parse failures (non-object input, wrong field types) fall back to
    /// the platform's default metadata — this path never errors.
    pub fn from_value(platform: Platform, value: Value) -> Self {
        match platform {
            Platform::GitHub => {
                Self::GitHub(serde_json::from_value(value).unwrap_or_default())
            }
            Platform::Jira => Self::Jira(serde_json::from_value(value).unwrap_or_default()),
            Platform::Slack => {
                Self::Slack(serde_json::from_value(value).unwrap_or_default())
            }
            Platform::Gmail => {
                Self::Gmail(serde_json::from_value(value).unwrap_or_default())
            }
            Platform::None => Self::None,
        }
    }

    /// PR or issue number, PR number preferred.
    pub fn number(&self) -> Option<u64> {
        match self {
            Self::GitHub(m) => m.pr_number.or(m.issue_number),
            _ => None,
        }
    }

    /// Page title: PR title, then generic title, then Jira summary.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::GitHub(m) => non_empty(&m.pr_title).or_else(|| non_empty(&m.title)),
            Self::Jira(m) => non_empty(&m.summary),
            _ => None,
        }
    }

    /// Author login (GitHub).
    pub fn author(&self) -> Option<&str> {
        match self {
            Self::GitHub(m) => non_empty(&m.author),
            _ => None,
        }
    }

    /// Issue key (Jira).
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Jira(m) => non_empty(&m.issue_key),
            _ => None,
        }
    }

    /// Issue summary (Jira).
    pub fn summary(&self) -> Option<&str> {
        match self {
            Self::Jira(m) => non_empty(&m.summary),
            _ => None,
        }
    }

    /// Channel name (Slack).
    pub fn channel(&self) -> Option<&str> {
        match self {
            Self::Slack(m) => non_empty(&m.channel_name),
            _ => None,
        }
    }

    /// Raw message text (Slack); truncation happens at templating time.
    pub fn message_preview(&self) -> Option<&str> {
        match self {
            Self::Slack(m) => non_empty(&m.message_text),
            _ => None,
        }
    }

    /// Sender display name (Slack or Gmail).
    pub fn sender_name(&self) -> Option<&str> {
        match self {
            Self::Slack(m) => non_empty(&m.sender_name),
            Self::Gmail(m) => non_empty(&m.sender_name),
            _ => None,
        }
    }

    /// Email subject (Gmail).
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Gmail(m) => non_empty(&m.email_subject),
            _ => None,
        }
    }

    /// Comment context kind (GitHub: "pr" or "issue").
    pub fn context_type(&self) -> Option<&str> {
        match self {
            Self::GitHub(m) => non_empty(&m.context_type),
            _ => None,
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
