//! Label suggestion by keyword matching.
//!
//! Matches user-defined labels against context keywords through a
//! synonym table. Matching is loose by design: substring containment is
//! tested in both directions so "Bugs" matches "bug" and "CI" matches
//! "ci/cd pipeline".

use serde::{Deserialize, Serialize};

use crate::templates;

/// At most this many labels are suggested for one context.
pub const MAX_SUGGESTIONS: usize = 3;

/// A user-defined label, as stored by the Marvin API.
///
/// The suggestion engine never creates or mutates labels — it only
/// matches the ones fetched from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Stable label identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Display color (hex string); not used for matching.
    #[serde(default)]
    pub color: String,
}

/// Suggest up to [`MAX_SUGGESTIONS`] labels for the given context keywords.
///
/// Each keyword expands through [`templates::keyword_synonyms`] (unknown
/// keywords act as their own only synonym). A label matches when its
/// lowercased title contains a synonym or a synonym contains the title.
/// Matches are returned in discovery order, unique by id — no scoring.
pub fn suggest_labels(user_labels: &[Label], keywords: &[String]) -> Vec<Label> {
    let mut out: Vec<Label> = Vec::new();

    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        let table = templates::keyword_synonyms(&keyword);
        let synonyms: Vec<&str> = if table.is_empty() {
            vec![keyword.as_str()]
        } else {
            table.to_vec()
        };

        for label in user_labels {
            if out.len() >= MAX_SUGGESTIONS {
                return out;
            }
            if out.iter().any(|l| l.id == label.id) {
                continue;
            }
            let label_title = label.title.to_lowercase();
            let matches = synonyms
                .iter()
                .any(|syn| label_title.contains(syn) || syn.contains(label_title.as_str()));
            if matches {
                out.push(label.clone());
            }
        }
    }

    out
}
