//! Slack context classifier.
//!
//! Default is a reply. The thread check and the DM check are
//! independent, not mutually exclusive: the DM check runs last and
//! unconditionally reassigns action and template, so a message that is
//! both threaded and DM-like classifies as a DM (last write wins).

use crate::metadata::SlackMetadata;
use crate::templates;

use super::{Action, Classification};

/// Classify a Slack message.
pub fn classify(meta: &SlackMetadata) -> Classification {
    let mut action = Action::Reply;
    let mut template_key = "slack-reply";

    if meta.is_thread {
        action = Action::Thread;
        template_key = "slack-thread";
    }

    // DM check runs after the thread check and always reassigns.
    let channel = meta.channel_name.to_lowercase();
    if channel.contains("direct message") || meta.is_dm {
        action = Action::Dm;
        template_key = "slack-dm";
    }

    Classification {
        action,
        template_key,
        estimate_ms: templates::default_estimate_ms(action),
        priority: templates::default_priority(action),
        label_keywords: vec!["slack".to_owned(), "reply".to_owned()],
    }
}
