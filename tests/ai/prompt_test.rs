//! Prompt construction tests.

use serde_json::json;

use marvin_suggest::ai::build_prompt;
use marvin_suggest::context::{build_task_context, UserPrefs};
use marvin_suggest::labels::Label;

fn label(title: &str) -> Label {
    Label {
        id: title.to_owned(),
        title: title.to_owned(),
        color: String::new(),
    }
}

#[test]
fn prompt_embeds_context_and_labels() {
    let ctx = build_task_context(
        "https://github.com/a/b/pull/7",
        json!({"prNumber": 7, "prTitle": "Add cache", "isOwnPR": false}),
        &UserPrefs::default(),
    );
    let prompt = build_prompt(&ctx, &[label("Bugs"), label("Code Review")]);

    assert!(prompt.contains("Platform: github"));
    assert!(prompt.contains("Detected action: review"));
    assert!(prompt.contains("Page title: Add cache"));
    assert!(prompt.contains("Bugs, Code Review"));
    assert!(prompt.contains("\"timeEstimate\""), "reply shape is mandated");
    assert!(prompt.contains("action verb"));
}

#[test]
fn missing_page_title_reads_unknown() {
    let ctx = build_task_context(
        "https://app.slack.com/client/T1/C1",
        json!({"channelName": "general"}),
        &UserPrefs::default(),
    );
    let prompt = build_prompt(&ctx, &[]);
    assert!(prompt.contains("Page title: Unknown"));
}

#[test]
fn metadata_dump_is_size_capped() {
    let huge = "m".repeat(3000);
    let ctx = build_task_context(
        "https://app.slack.com/client/T1/C1",
        json!({"channelName": "general", "messageText": huge}),
        &UserPrefs::default(),
    );
    let prompt = build_prompt(&ctx, &[]);
    assert!(
        !prompt.contains(&"m".repeat(600)),
        "metadata dump must be truncated"
    );
    assert!(prompt.len() < 2000);
}
