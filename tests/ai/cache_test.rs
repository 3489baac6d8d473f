//! Suggestion cache TTL and store behavior tests.

use std::sync::Arc;

use marvin_suggest::ai::cache::{
    cache_key, CacheEntry, CacheError, CacheMap, CacheStore, Clock, FileCacheStore,
    MemoryCacheStore, SuggestionCache,
};
use marvin_suggest::ai::{AiPriority, AiSuggestion};
use marvin_suggest::platform::Platform;

const TTL: u64 = 60_000;
const NOW: u64 = 1_700_000_000_000;

/// Deterministic time source.
struct FixedClock(u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

/// Store handle the test keeps after the cache takes ownership.
struct SharedStore(Arc<MemoryCacheStore>);

impl CacheStore for SharedStore {
    fn load(&self) -> Result<CacheMap, CacheError> {
        self.0.load()
    }

    fn save(&self, entries: &CacheMap) -> Result<(), CacheError> {
        self.0.save(entries)
    }
}

fn suggestion(title: &str) -> AiSuggestion {
    AiSuggestion {
        title: title.to_owned(),
        time_estimate_ms: None,
        suggested_labels: Vec::new(),
        priority: AiPriority::None,
        note: String::new(),
        is_ai_suggestion: true,
        from_cache: false,
    }
}

fn entry(title: &str, timestamp: u64) -> CacheEntry {
    CacheEntry {
        suggestions: suggestion(title),
        timestamp,
    }
}

fn cache_with(entries: CacheMap, now: u64) -> SuggestionCache {
    let store = MemoryCacheStore::default();
    store.save(&entries).expect("seed should save");
    SuggestionCache::new(Box::new(store), Box::new(FixedClock(now)), TTL)
}

#[test]
fn entry_just_inside_ttl_is_served_from_cache() {
    let mut entries = CacheMap::new();
    entries.insert("k".to_owned(), entry("cached", NOW - TTL + 1));
    let cache = cache_with(entries, NOW);

    let hit = cache.get("k").expect("should hit");
    assert_eq!(hit.title, "cached");
    assert!(hit.from_cache, "cache hits must be tagged");
}

#[test]
fn entry_just_past_ttl_is_invalid() {
    let mut entries = CacheMap::new();
    entries.insert("k".to_owned(), entry("stale", NOW - TTL - 1));
    let cache = cache_with(entries, NOW);

    assert_eq!(cache.get("k"), None);
}

#[test]
fn entry_exactly_at_ttl_is_invalid() {
    // Validity is strict: now - timestamp < ttl.
    let mut entries = CacheMap::new();
    entries.insert("k".to_owned(), entry("edge", NOW - TTL));
    let cache = cache_with(entries, NOW);

    assert_eq!(cache.get("k"), None);
}

#[test]
fn missing_key_misses() {
    let cache = cache_with(CacheMap::new(), NOW);
    assert_eq!(cache.get("absent"), None);
}

#[test]
fn put_evicts_expired_entries_lazily() {
    let mut seed = CacheMap::new();
    seed.insert("stale".to_owned(), entry("stale", NOW - TTL - 1));
    seed.insert("fresh".to_owned(), entry("fresh", NOW - 1));

    let store = Arc::new(MemoryCacheStore::default());
    store.save(&seed).expect("seed should save");
    let cache = SuggestionCache::new(
        Box::new(SharedStore(Arc::clone(&store))),
        Box::new(FixedClock(NOW)),
        TTL,
    );

    cache.put("new", &suggestion("new"));

    let persisted = store.load().expect("should load");
    assert!(persisted.contains_key("new"));
    assert!(persisted.contains_key("fresh"));
    assert!(
        !persisted.contains_key("stale"),
        "expired entries are swept on write"
    );
    assert_eq!(persisted["new"].timestamp, NOW);
}

#[test]
fn get_leaves_expired_entries_in_place() {
    // Reads never sweep; only writes do.
    let mut seed = CacheMap::new();
    seed.insert("stale".to_owned(), entry("stale", NOW - TTL - 1));

    let store = Arc::new(MemoryCacheStore::default());
    store.save(&seed).expect("seed should save");
    let cache = SuggestionCache::new(
        Box::new(SharedStore(Arc::clone(&store))),
        Box::new(FixedClock(NOW)),
        TTL,
    );

    assert_eq!(cache.get("stale"), None);
    let persisted = store.load().expect("should load");
    assert!(persisted.contains_key("stale"));
}

#[test]
fn file_store_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileCacheStore::at(dir.path().join("cache.json"));

    let mut entries = CacheMap::new();
    entries.insert("k".to_owned(), entry("persisted", NOW));
    store.save(&entries).expect("should save");

    let loaded = store.load().expect("should load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded["k"].suggestions.title, "persisted");
}

#[test]
fn file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileCacheStore::at(dir.path().join("nope.json"));
    assert!(store.load().expect("should load").is_empty());
}

#[test]
fn corrupt_cache_degrades_to_miss() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cache.json");
    std::fs::write(&path, "{{{ corrupt").expect("write");

    let cache = SuggestionCache::new(
        Box::new(FileCacheStore::at(path)),
        Box::new(FixedClock(NOW)),
        TTL,
    );
    assert_eq!(cache.get("k"), None);
}

#[test]
fn cache_key_components_all_matter() {
    let base = cache_key(Platform::GitHub, "u", "t");
    assert_ne!(base, cache_key(Platform::Jira, "u", "t"));
    assert_ne!(base, cache_key(Platform::GitHub, "v", "t"));
    assert_ne!(base, cache_key(Platform::GitHub, "u", "s"));
}
