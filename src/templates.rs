//! Static suggestion tables: title templates, default estimates,
//! default priorities, label keyword synonyms, and Jira priority words.
//!
//! Pure data, no behavior. Keeping the tables in one place keeps the
//! classifier decision trees auditable — classifiers name entries here
//! instead of carrying inline literals.

use crate::context::Action;

/// Template key used when a classifier supplies an unknown key.
pub const GENERIC_TEMPLATE_KEY: &str = "generic";

/// Title template used for unknown template keys.
pub const GENERIC_TEMPLATE: &str = "{title}";

/// Priority assigned when nothing suggests urgency.
pub const NO_PRIORITY: u8 = 0;

/// Highest priority a suggestion can carry.
pub const MAX_PRIORITY: u8 = 3;

/// Look up the title template for a template key.
///
/// Placeholders (`{number}`, `{title}`, ...) are substituted by
/// [`crate::title::generate_title`]. Returns `None` for unknown keys;
/// callers fall back to [`GENERIC_TEMPLATE`].
pub fn title_template(key: &str) -> Option<&'static str> {
    Some(match key {
        "github-pr-review" => "Review PR #{number}: {title}",
        "github-pr-fix-pipeline" => "Fix failing checks on PR #{number}: {title}",
        "github-pr-address-changes" => "Address review feedback on PR #{number}: {title}",
        "github-pr-merge" => "Merge PR #{number}: {title}",
        "github-pr-follow-up" => "Follow up on PR #{number}: {title}",
        "github-issue" => "Fix #{number}: {title}",
        "github-reply" => "Reply to {author} on {contextType} #{number}",
        "github-comment" => "Comment on {contextType} #{number}",
        "github-notification" => "Check GitHub notification: {title}",
        "jira-task" => "Work on {key}: {summary}",
        "jira-bug" => "Fix {key}: {summary}",
        "jira-story" => "Implement {key}: {summary}",
        "jira-epic" => "Plan {key}: {summary}",
        "slack-reply" => "Reply in {channel}: {messagePreview}",
        "slack-thread" => "Follow up on thread in {channel}: {messagePreview}",
        "slack-dm" => "Reply to {senderName}: {messagePreview}",
        "gmail-reply" => "Reply to {senderName}: {subject}",
        GENERIC_TEMPLATE_KEY => GENERIC_TEMPLATE,
        _ => return None,
    })
}

/// Default time estimate for an action, in milliseconds.
pub fn default_estimate_ms(action: Action) -> u64 {
    match action {
        Action::Review => 1_800_000,         // 30 min
        Action::FixPipeline => 2_700_000,    // 45 min
        Action::AddressChanges => 1_800_000, // 30 min
        Action::Merge => 600_000,            // 10 min
        Action::FollowUp => 900_000,         // 15 min
        Action::Fix => 3_600_000,            // 60 min
        Action::Reply => 900_000,            // 15 min
        Action::Comment => 600_000,          // 10 min
        Action::Check => 300_000,            // 5 min
        Action::Task => 1_800_000,           // 30 min
        Action::Bug => 3_600_000,            // 60 min
        Action::Story => 7_200_000,          // 120 min
        Action::Thread => 1_200_000,         // 20 min
        Action::Dm => 600_000,               // 10 min
    }
}

/// Default priority (0-3) for an action.
pub fn default_priority(action: Action) -> u8 {
    match action {
        Action::FixPipeline => MAX_PRIORITY,
        Action::Review | Action::AddressChanges | Action::Bug => 2,
        Action::Check => NO_PRIORITY,
        _ => 1,
    }
}

/// Synonyms used when matching a context keyword against user labels.
///
/// Returns an empty slice for unknown keywords; the label suggester then
/// treats the keyword itself as its only synonym.
pub fn keyword_synonyms(keyword: &str) -> &'static [&'static str] {
    match keyword {
        "review" => &["review", "code review", "pr", "pull request"],
        "bug" => &["bug", "bugs", "fix", "defect"],
        "ci" => &["ci", "pipeline", "build", "devops"],
        "github" => &["github", "code", "dev"],
        "jira" => &["jira", "ticket", "work"],
        "story" => &["story", "feature"],
        "epic" => &["epic", "planning"],
        "urgent" => &["urgent", "priority", "important", "asap"],
        "slack" => &["slack", "chat", "message"],
        "email" => &["email", "mail", "inbox"],
        "reply" => &["reply", "respond", "communication"],
        _ => &[],
    }
}

/// Map a Jira priority name to a numeric priority (0-3).
///
/// Case-insensitive substring match; "highest"/"critical" are checked
/// before "high" so the longer word wins.
pub fn priority_from_text(text: &str) -> u8 {
    let lower = text.to_lowercase();
    if lower.contains("highest") || lower.contains("critical") {
        MAX_PRIORITY
    } else if lower.contains("high") {
        2
    } else if lower.contains("medium") {
        1
    } else {
        NO_PRIORITY
    }
}
