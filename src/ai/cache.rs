//! TTL-bounded cache for AI suggestions.
//!
//! The cache is an explicit abstraction over an injected key-value
//! store and an injected clock, so tests run deterministically without
//! touching the wall clock or the filesystem. Expired entries are
//! lazily purged on the next write, never swept in the background.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::platform::Platform;

use super::AiSuggestion;

/// Cache keys are cut to this many characters.
const CACHE_KEY_CHARS: usize = 32;

/// Default entry time-to-live: 24 hours.
pub const DEFAULT_TTL_MS: u64 = 86_400_000;

/// Compute the cache key for a suggestion context.
///
/// First [`CACHE_KEY_CHARS`] characters of
/// base64(`platform:source_url:template_key`). The key deliberately
/// ignores metadata content, and truncation can collide — both are
/// accepted tradeoffs, not correctness guarantees.
pub fn cache_key(platform: Platform, source_url: &str, template_key: &str) -> String {
    let raw = format!("{}:{}:{}", platform.as_str(), source_url, template_key);
    STANDARD.encode(raw.as_bytes()).chars().take(CACHE_KEY_CHARS).collect()
}

/// A cached suggestion with its write timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached suggestion.
    pub suggestions: AiSuggestion,
    /// Write time, epoch milliseconds.
    pub timestamp: u64,
}

/// The full cache contents, keyed by [`cache_key`].
pub type CacheMap = HashMap<String, CacheEntry>;

/// Errors from cache store backends.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Underlying file I/O failed.
    #[error("cache store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Cache contents could not be (de)serialized.
    #[error("cache store serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Time source for TTL checks.
pub trait Clock: Send + Sync {
    /// Current time as epoch milliseconds.
    fn now_ms(&self) -> u64;
}

/// Wall-clock time source used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Key-value backend holding the whole cache map.
///
/// Reads and writes move the entire map: the cache is small (one entry
/// per recently-visited page) and the store is shared mutable state, so
/// read-modify-write is not atomic across processes — last write wins.
pub trait CacheStore: Send + Sync {
    /// Load the full cache map.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend cannot be read or parsed.
    fn load(&self) -> Result<CacheMap, CacheError>;

    /// Persist the full cache map.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend cannot be written.
    fn save(&self, entries: &CacheMap) -> Result<(), CacheError>;
}

/// JSON-file-backed cache store.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    /// Store backed by an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the per-user cache location
    /// (`<cache dir>/marvin-suggest/ai-suggestions.json`).
    ///
    /// # Errors
    ///
    /// Returns an error when no per-user cache directory can be
    /// resolved or created.
    pub fn default_location() -> anyhow::Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "marvin-suggest")
            .ok_or_else(|| anyhow::anyhow!("no per-user cache directory available"))?;
        let dir = dirs.cache_dir();
        std::fs::create_dir_all(dir)
            .map_err(|e| anyhow::anyhow!("failed to create cache directory {}: {e}", dir.display()))?;
        Ok(Self::at(dir.join("ai-suggestions.json")))
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self) -> Result<CacheMap, CacheError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CacheMap::new()),
            Err(e) => Err(CacheError::Io(e)),
        }
    }

    fn save(&self, entries: &CacheMap) -> Result<(), CacheError> {
        let contents = serde_json::to_string(entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-memory cache store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<CacheMap>,
}

impl CacheStore for MemoryCacheStore {
    fn load(&self) -> Result<CacheMap, CacheError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn save(&self, entries: &CacheMap) -> Result<(), CacheError> {
        *self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = entries.clone();
        Ok(())
    }
}

/// TTL cache over an injected store and clock.
pub struct SuggestionCache {
    store: Box<dyn CacheStore>,
    clock: Box<dyn Clock>,
    ttl_ms: u64,
}

impl SuggestionCache {
    /// Build a cache from its collaborators.
    pub fn new(store: Box<dyn CacheStore>, clock: Box<dyn Clock>, ttl_ms: u64) -> Self {
        Self {
            store,
            clock,
            ttl_ms,
        }
    }

    /// Look up a non-expired entry, tagging it as served from cache.
    ///
    /// An entry is valid while `now - timestamp < ttl`. Expired entries
    /// are left in place here; they fall out on the next [`put`].
    ///
    /// [`put`]: SuggestionCache::put
    pub fn get(&self, key: &str) -> Option<AiSuggestion> {
        let entries = self.load_entries();
        let entry = entries.get(key)?;
        let now = self.clock.now_ms();
        if now.saturating_sub(entry.timestamp) < self.ttl_ms {
            let mut suggestion = entry.suggestions.clone();
            suggestion.from_cache = true;
            Some(suggestion)
        } else {
            None
        }
    }

    /// Write a fresh suggestion through to the store.
    ///
    /// All expired entries are evicted in the same write (lazy sweep).
    /// Store failures degrade to a logged warning — callers already
    /// hold the suggestion, so a lost cache write is not an error.
    pub fn put(&self, key: &str, suggestion: &AiSuggestion) {
        let mut entries = self.load_entries();
        let now = self.clock.now_ms();
        entries.retain(|_, entry| now.saturating_sub(entry.timestamp) < self.ttl_ms);
        entries.insert(
            key.to_owned(),
            CacheEntry {
                suggestions: suggestion.clone(),
                timestamp: now,
            },
        );
        if let Err(e) = self.store.save(&entries) {
            warn!(error = %e, "failed to persist suggestion cache");
        }
    }

    fn load_entries(&self) -> CacheMap {
        self.store.load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load suggestion cache, starting empty");
            CacheMap::new()
        })
    }
}
