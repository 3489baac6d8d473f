//! Title generation from templates and scraped metadata.
//!
//! Literal placeholder substitution over a fixed token set, followed by
//! a cleanup pass that strips any token the metadata could not fill.

use regex::Regex;

use crate::metadata::SourceMetadata;
use crate::templates;

/// Slack message previews are cut to this many characters.
const PREVIEW_MAX_CHARS: usize = 50;

/// Render the title for a template key from scraped metadata.
///
/// Unknown keys fall back to the generic `"{title}"` template. Tokens
/// without a metadata value are stripped, and the result is trimmed, so
/// this never errors and is idempotent on fully-substituted strings.
pub fn generate_title(template_key: &str, meta: &SourceMetadata) -> String {
    let template =
        templates::title_template(template_key).unwrap_or(templates::GENERIC_TEMPLATE);

    let mut out = template.to_owned();
    for (token, value) in substitutions(meta) {
        if let Some(value) = value {
            out = out.replace(token, &value);
        }
    }

    // Strip tokens left unfilled by absent metadata fields.
    if let Ok(re) = Regex::new(r"\{[^{}]*\}") {
        out = re.replace_all(&out, "").into_owned();
    }
    out.trim().to_owned()
}

/// Wrap a title as a markdown hyperlink when a source URL is available.
///
/// The `[title](url)` form matches the markdown convention used in task
/// notes sent to the Marvin API; with no URL the bare title is returned.
pub fn generate_title_with_link(title: &str, url: &str) -> String {
    if url.trim().is_empty() {
        title.to_owned()
    } else {
        format!("[{title}]({url})")
    }
}

/// The fixed token set and the metadata value each token pulls from.
fn substitutions(meta: &SourceMetadata) -> [(&'static str, Option<String>); 10] {
    [
        ("{number}", meta.number().map(|n| n.to_string())),
        ("{title}", meta.title().map(str::to_owned)),
        ("{author}", meta.author().map(str::to_owned)),
        ("{key}", meta.key().map(str::to_owned)),
        ("{summary}", meta.summary().map(str::to_owned)),
        ("{channel}", meta.channel().map(str::to_owned)),
        (
            "{messagePreview}",
            meta.message_preview().map(truncate_preview),
        ),
        ("{senderName}", meta.sender_name().map(str::to_owned)),
        ("{subject}", meta.subject().map(str::to_owned)),
        ("{contextType}", meta.context_type().map(str::to_owned)),
    ]
}

fn truncate_preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        return text.to_owned();
    }
    let cut: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
    format!("{cut}...")
}
