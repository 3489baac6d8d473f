//! Jira context classifier.
//!
//! Default is a generic work task. The issue type overrides to bug or
//! story; epics change only the template key (estimate and action stay
//! at the task defaults). Priority comes from the issue's priority
//! field, not from the action.

use crate::metadata::JiraMetadata;
use crate::templates;

use super::{Action, Classification};

/// Classify a Jira issue.
pub fn classify(meta: &JiraMetadata) -> Classification {
    let issue_type = meta.issue_type.to_lowercase();

    let mut classification = if issue_type.contains("bug") {
        Classification::for_action(Action::Bug, "jira-bug", &["jira", "bug"])
    } else if issue_type.contains("story") {
        Classification::for_action(Action::Story, "jira-story", &["jira", "story"])
    } else {
        let mut c = Classification::for_action(Action::Task, "jira-task", &["jira"]);
        if issue_type.contains("epic") {
            c.template_key = "jira-epic";
            c.label_keywords.push("epic".to_owned());
        }
        c
    };

    classification.priority = templates::priority_from_text(&meta.priority);
    if classification.priority == templates::MAX_PRIORITY {
        classification.label_keywords.push("urgent".to_owned());
    }
    classification
}
