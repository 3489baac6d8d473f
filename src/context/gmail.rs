//! Gmail context classifier.
//!
//! Email context does not currently distinguish new vs. reply vs.
//! thread — every Gmail page yields the same fixed reply context.

use crate::metadata::GmailMetadata;

use super::{Action, Classification};

/// Classify a Gmail message view.
pub fn classify(_meta: &GmailMetadata) -> Classification {
    Classification::for_action(Action::Reply, "gmail-reply", &["email", "reply"])
}
