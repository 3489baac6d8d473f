//! Source platform detection from page URLs.
//!
//! Classification is ordered substring matching — first match wins,
//! no scoring or ambiguity resolution. Pure and infallible: anything
//! unrecognized (including an empty URL) is [`Platform::None`].

use serde::{Deserialize, Serialize};

/// The web platform a page was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// github.com — pull requests, issues, notifications.
    GitHub,
    /// Atlassian Jira (cloud or self-hosted).
    Jira,
    /// Slack workspace pages.
    Slack,
    /// Gmail web client.
    Gmail,
    /// No recognized platform.
    None,
}

impl Platform {
    /// Detect the platform for a URL.
    ///
    /// Checks substrings in fixed order: GitHub, Jira (atlassian.net or
    /// "jira" anywhere in the URL), Slack, Gmail. First match wins.
    pub fn detect(url: &str) -> Self {
        if url.is_empty() {
            return Self::None;
        }
        if url.contains("github.com") {
            return Self::GitHub;
        }
        if url.contains("atlassian.net") || url.contains("jira") {
            return Self::Jira;
        }
        if url.contains("slack.com") {
            return Self::Slack;
        }
        if url.contains("mail.google.com") {
            return Self::Gmail;
        }
        Self::None
    }

    /// The lowercase identifier used in cache keys, prompts, and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::Jira => "jira",
            Self::Slack => "slack",
            Self::Gmail => "gmail",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
