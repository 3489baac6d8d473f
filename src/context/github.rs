//! GitHub context classifier.
//!
//! Decision tree with a strict precedence order:
//! 1. PR context (URL contains `/pull/` or the scraper says `type: "pr"`)
//! 2. Issue context (URL contains `/issues/`)
//! 3. Comment context (`type: "comment"`)
//! 4. Notification context, branching on the notification reason.

use crate::metadata::GitHubMetadata;

use super::{Action, Classification};

/// Classify a GitHub page.
pub fn classify(source_url: &str, meta: &GitHubMetadata) -> Classification {
    if source_url.contains("/pull/") || meta.kind == "pr" {
        return classify_pr(meta);
    }
    if source_url.contains("/issues/") {
        return Classification::for_action(Action::Fix, "github-issue", &["bug", "github"]);
    }
    if meta.kind == "comment" {
        return classify_comment(meta);
    }
    classify_notification(meta)
}

/// PR precedence: not-own PR always means review, regardless of check
/// or review state. For own PRs: failing checks > changes requested >
/// approved > default follow-up.
fn classify_pr(meta: &GitHubMetadata) -> Classification {
    if !meta.is_own_pr {
        return Classification::for_action(Action::Review, "github-pr-review", &["review", "github"]);
    }
    if meta.check_status == "failing" {
        return Classification::for_action(Action::FixPipeline, "github-pr-fix-pipeline", &["ci", "bug"]);
    }
    if meta.review_status == "changes_requested" {
        return Classification::for_action(
            Action::AddressChanges,
            "github-pr-address-changes",
            &["review", "github"],
        );
    }
    if meta.review_status == "approved" {
        return Classification::for_action(Action::Merge, "github-pr-merge", &["github"]);
    }
    Classification::for_action(Action::FollowUp, "github-pr-follow-up", &["github"])
}

/// A comment with a known author is a reply; otherwise a fresh comment.
fn classify_comment(meta: &GitHubMetadata) -> Classification {
    if meta.author.is_empty() {
        Classification::for_action(Action::Comment, "github-comment", &["github"])
    } else {
        Classification::for_action(Action::Reply, "github-reply", &["github", "reply"])
    }
}

/// Five known notification reasons plus a default.
fn classify_notification(meta: &GitHubMetadata) -> Classification {
    match meta.reason.as_str() {
        "review_requested" => {
            Classification::for_action(Action::Review, "github-pr-review", &["review", "github"])
        }
        "mention" => {
            Classification::for_action(Action::Reply, "github-notification", &["github", "reply"])
        }
        "assign" => Classification::for_action(Action::Fix, "github-notification", &["bug", "github"]),
        "author" => Classification::for_action(Action::FollowUp, "github-notification", &["github"]),
        "ci_activity" => {
            Classification::for_action(Action::FixPipeline, "github-notification", &["ci"])
        }
        _ => Classification::for_action(Action::Check, "github-notification", &["github"]),
    }
}
