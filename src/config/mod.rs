//! Configuration loading and management.
//!
//! Loads configuration from `./marvin-suggest.toml` (or
//! `$MARVIN_SUGGEST_CONFIG`). Environment variables override file
//! values; file values override defaults.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ai::providers::ProviderKind;
use crate::context::UserPrefs;

/// AI settings consumed by the suggestion client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Master switch; off means the client never touches the network.
    pub enabled: bool,
    /// Provider API key; empty disables the client as well.
    pub api_key: String,
    /// Which back end to call.
    pub provider: ProviderKind,
    /// Model identifier passed to the provider.
    pub model: String,
    /// Whether suggestion caching is active.
    pub cache_enabled: bool,
    /// Cache entry time-to-live in milliseconds.
    pub cache_ttl_ms: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            provider: ProviderKind::Anthropic,
            model: "claude-3-5-haiku-latest".to_owned(),
            cache_enabled: true,
            cache_ttl_ms: crate::ai::cache::DEFAULT_TTL_MS,
        }
    }
}

/// Top-level configuration loaded from TOML.
///
/// Path: `./marvin-suggest.toml` or `$MARVIN_SUGGEST_CONFIG`.
/// Env vars override file values; file values override defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AI provider settings (`[ai]`).
    pub ai: AiSettings,
    /// Custom per-action estimate overrides in milliseconds
    /// (`[estimates]`), keyed by action id, e.g. `review = 1200000`.
    pub estimates: HashMap<String, u64>,
}

impl Config {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// A missing config file is not an error — defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from the TOML file only, no env overrides.
    fn load_from_file() -> Result<Self> {
        let path = Self::config_path_with(|key| std::env::var(key).ok());
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                let config: Config =
                    toml::from_str(&contents).context("failed to parse config TOML")?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config file found, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(anyhow::anyhow!("failed to read config file: {e}")),
        }
    }

    /// Resolve the config path using a custom env resolver (for testing).
    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(p) = env("MARVIN_SUGGEST_CONFIG") {
            return PathBuf::from(p);
        }
        PathBuf::from("marvin-suggest.toml")
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function for testability.
    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("MARVIN_SUGGEST_AI_ENABLED") {
            match v.parse() {
                Ok(b) => self.ai.enabled = b,
                Err(_) => tracing::warn!(
                    var = "MARVIN_SUGGEST_AI_ENABLED",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("MARVIN_SUGGEST_AI_API_KEY") {
            self.ai.api_key = v;
        }
        if let Some(v) = env("MARVIN_SUGGEST_AI_PROVIDER") {
            match ProviderKind::parse(&v) {
                Some(kind) => self.ai.provider = kind,
                None => tracing::warn!(
                    var = "MARVIN_SUGGEST_AI_PROVIDER",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("MARVIN_SUGGEST_AI_MODEL") {
            self.ai.model = v;
        }
        if let Some(v) = env("MARVIN_SUGGEST_AI_CACHE_TTL_MS") {
            match v.parse() {
                Ok(ms) => self.ai.cache_ttl_ms = ms,
                Err(_) => tracing::warn!(
                    var = "MARVIN_SUGGEST_AI_CACHE_TTL_MS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
    }

    /// User preferences view for the context builder.
    pub fn user_prefs(&self) -> UserPrefs {
        UserPrefs {
            custom_estimates_ms: self.estimates.clone(),
        }
    }
}
