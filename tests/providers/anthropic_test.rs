//! Anthropic provider wire format tests.

use serde_json::json;

use marvin_suggest::ai::providers::anthropic::{build_request, parse_reply};
use marvin_suggest::ai::providers::{ProviderError, MAX_OUTPUT_TOKENS};

#[test]
fn build_request_sets_model_and_token_ceiling() {
    let req = build_request("claude-3-5-haiku-latest", "Draft a task");
    assert_eq!(req.model, "claude-3-5-haiku-latest");
    assert_eq!(req.max_tokens, MAX_OUTPUT_TOKENS);
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].role, "user");
    assert_eq!(req.messages[0].content, "Draft a task");
}

#[test]
fn request_serializes_to_messages_api_shape() {
    let req = build_request("m", "p");
    let value = serde_json::to_value(&req).expect("should serialize");
    assert_eq!(
        value,
        json!({
            "model": "m",
            "max_tokens": 250,
            "messages": [{"role": "user", "content": "p"}]
        })
    );
}

#[test]
fn parse_reply_extracts_first_content_block() {
    let body = json!({
        "content": [{"type": "text", "text": "{\"title\": \"Review PR\"}"}],
        "model": "claude-3-5-haiku-latest",
        "stop_reason": "end_turn"
    });
    let text = parse_reply(&body.to_string()).expect("should parse");
    assert_eq!(text, "{\"title\": \"Review PR\"}");
}

#[test]
fn parse_reply_rejects_empty_content() {
    let body = json!({"content": []});
    let err = parse_reply(&body.to_string()).expect_err("should fail");
    assert!(matches!(err, ProviderError::Parse(_)));
}

#[test]
fn parse_reply_rejects_invalid_json() {
    let err = parse_reply("not json").expect_err("should fail");
    assert!(matches!(err, ProviderError::Parse(_)));
}
