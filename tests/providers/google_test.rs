//! Google provider wire format tests.

use serde_json::json;

use marvin_suggest::ai::providers::google::{build_request, parse_reply, request_url};
use marvin_suggest::ai::providers::ProviderError;

#[test]
fn request_url_embeds_model_and_key() {
    let url = request_url("gemini-2.0-flash", "KEY123");
    assert_eq!(
        url,
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=KEY123"
    );
}

#[test]
fn request_serializes_to_generate_content_shape() {
    let req = build_request("p");
    let value = serde_json::to_value(&req).expect("should serialize");
    assert_eq!(
        value,
        json!({
            "contents": [{"parts": [{"text": "p"}]}],
            "generationConfig": {"maxOutputTokens": 250}
        })
    );
}

#[test]
fn parse_reply_extracts_first_candidate_part() {
    let body = json!({
        "candidates": [
            {"content": {"parts": [{"text": "reply text"}], "role": "model"}}
        ]
    });
    let text = parse_reply(&body.to_string()).expect("should parse");
    assert_eq!(text, "reply text");
}

#[test]
fn parse_reply_rejects_empty_candidates() {
    let err = parse_reply(&json!({"candidates": []}).to_string()).expect_err("should fail");
    assert!(matches!(err, ProviderError::Parse(_)));
}

#[test]
fn parse_reply_rejects_candidate_without_parts() {
    let body = json!({"candidates": [{"content": {"parts": []}}]});
    let err = parse_reply(&body.to_string()).expect_err("should fail");
    assert!(matches!(err, ProviderError::Parse(_)));
}
