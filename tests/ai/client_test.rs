//! Suggestion client behavior tests with a counting mock provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use marvin_suggest::ai::cache::{Clock, MemoryCacheStore, SuggestionCache};
use marvin_suggest::ai::providers::{AiProvider, ProviderError};
use marvin_suggest::ai::SuggestionClient;
use marvin_suggest::config::AiSettings;
use marvin_suggest::context::{build_task_context, TaskContext, UserPrefs};
use marvin_suggest::labels::Label;

const NOW: u64 = 1_700_000_000_000;

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

/// Mock provider that counts calls and returns a fixed reply.
struct CountingProvider {
    calls: Arc<AtomicUsize>,
    reply: Result<String, ()>,
}

impl CountingProvider {
    fn replying(calls: Arc<AtomicUsize>, reply: &str) -> Self {
        Self {
            calls,
            reply: Ok(reply.to_owned()),
        }
    }

    fn failing(calls: Arc<AtomicUsize>) -> Self {
        Self {
            calls,
            reply: Err(()),
        }
    }
}

#[async_trait]
impl AiProvider for CountingProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(()) => Err(ProviderError::Parse("mock failure".to_owned())),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

fn settings(enabled: bool, api_key: &str, cache_enabled: bool) -> AiSettings {
    AiSettings {
        enabled,
        api_key: api_key.to_owned(),
        cache_enabled,
        ..AiSettings::default()
    }
}

fn cache() -> SuggestionCache {
    SuggestionCache::new(
        Box::new(MemoryCacheStore::default()),
        Box::new(FixedClock(NOW)),
        60_000,
    )
}

fn context() -> TaskContext {
    build_task_context(
        "https://github.com/a/b/pull/1",
        json!({"prNumber": 1, "prTitle": "Add cache"}),
        &UserPrefs::default(),
    )
}

fn client_with(
    settings: AiSettings,
    calls: Arc<AtomicUsize>,
    reply: &str,
) -> SuggestionClient {
    SuggestionClient::with_provider(
        settings,
        cache(),
        Box::new(CountingProvider::replying(calls, reply)),
    )
}

const VALID_REPLY: &str = r#"{"title": "Review the cache PR", "timeEstimate": 20}"#;

#[tokio::test]
async fn disabled_settings_skip_the_network_entirely() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = client_with(settings(false, "key", true), Arc::clone(&calls), VALID_REPLY);

    let result = client.suggest(&context(), &[]).await;
    assert_eq!(result, None);
    assert_eq!(calls.load(Ordering::SeqCst), 0, "no provider call when disabled");
}

#[tokio::test]
async fn empty_api_key_skips_the_network_entirely() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = client_with(settings(true, "", true), Arc::clone(&calls), VALID_REPLY);

    let result = client.suggest(&context(), &[]).await;
    assert_eq!(result, None);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fresh_suggestion_then_cache_hit() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = client_with(settings(true, "key", true), Arc::clone(&calls), VALID_REPLY);
    let ctx = context();

    let first = client.suggest(&ctx, &[]).await.expect("should suggest");
    assert_eq!(first.title, "Review the cache PR");
    assert_eq!(first.time_estimate_ms, Some(1_200_000));
    assert!(!first.from_cache);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let second = client.suggest(&ctx, &[]).await.expect("should suggest");
    assert!(second.from_cache, "second request must come from cache");
    assert_eq!(second.title, first.title);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "cache hit makes no network call");
}

#[tokio::test]
async fn caching_disabled_calls_the_provider_every_time() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = client_with(settings(true, "key", false), Arc::clone(&calls), VALID_REPLY);
    let ctx = context();

    let first = client.suggest(&ctx, &[]).await.expect("should suggest");
    let second = client.suggest(&ctx, &[]).await.expect("should suggest");
    assert!(!first.from_cache);
    assert!(!second.from_cache);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn provider_failure_degrades_to_none() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = SuggestionClient::with_provider(
        settings(true, "key", true),
        cache(),
        Box::new(CountingProvider::failing(Arc::clone(&calls))),
    );

    assert_eq!(client.suggest(&context(), &[]).await, None);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unparseable_reply_is_not_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = client_with(settings(true, "key", true), Arc::clone(&calls), "not json");
    let ctx = context();

    assert_eq!(client.suggest(&ctx, &[]).await, None);
    assert_eq!(client.suggest(&ctx, &[]).await, None);
    assert_eq!(
        calls.load(Ordering::SeqCst),
        2,
        "failures are terminal, not cached; a retry calls the provider again"
    );
}

#[tokio::test]
async fn reply_labels_are_matched_against_real_labels() {
    let calls = Arc::new(AtomicUsize::new(0));
    let reply = r#"{"title": "Review it", "suggestedLabels": ["code review", "Made Up"]}"#;
    let client = client_with(settings(true, "key", true), Arc::clone(&calls), reply);

    let labels = vec![Label {
        id: "l1".to_owned(),
        title: "Code Review".to_owned(),
        color: String::new(),
    }];
    let suggestion = client
        .suggest(&context(), &labels)
        .await
        .expect("should suggest");
    assert_eq!(suggestion.suggested_labels.len(), 1);
    assert_eq!(suggestion.suggested_labels[0].id, "l1");
}
