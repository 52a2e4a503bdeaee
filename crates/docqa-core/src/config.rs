//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! into a typed [`Settings`] tree whose every key has a default.
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::Error;
use crate::types::GenerationOptions;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Merge `config.toml`, `config.<env>.toml` (by `RUST_ENV`) found in `dir`,
    /// then `APP_*` variables with `__` as the nesting separator.
    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        debug!(env = %env_name, dir = %dir.display(), "loading configuration");

        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract the full typed settings tree and validate it.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub retrieval: RetrievalSettings,
    pub llm: LlmSettings,
    pub guard: GuardSettings,
    pub ingest: IngestSettings,
    pub models: ModelSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), Error> {
        let r = &self.retrieval;
        if r.top_k == 0 {
            return Err(Error::InvalidConfig("retrieval.top_k must be at least 1".into()));
        }
        if r.candidate_pool < r.top_k {
            return Err(Error::InvalidConfig(format!(
                "retrieval.candidate_pool ({}) must be >= retrieval.top_k ({})",
                r.candidate_pool, r.top_k
            )));
        }
        if r.timeout_secs == 0 || r.rerank_timeout_secs == 0 || self.llm.timeout_secs == 0 {
            return Err(Error::InvalidConfig("timeouts must be greater than zero".into()));
        }
        if !(0.0..1.0).contains(&self.ingest.overlap_percent) {
            return Err(Error::InvalidConfig("ingest.overlap_percent must be in [0, 1)".into()));
        }
        if self.ingest.max_tokens == 0 {
            return Err(Error::InvalidConfig("ingest.max_tokens must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub path: String,
    pub table: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { path: "data/lancedb".to_string(), table: "chunks".to_string() }
    }
}

/// What the noise filter does when every candidate falls below the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// Keep the single best-scoring chunk.
    #[default]
    KeepBest,
    /// Return nothing and let the pipeline answer "not found".
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub candidate_pool: usize,
    pub top_k: usize,
    pub noise_threshold: f32,
    pub empty_policy: EmptyPolicy,
    pub timeout_secs: u64,
    /// Budget for scoring the whole candidate pool with the reranker.
    pub rerank_timeout_secs: u64,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            candidate_pool: 25,
            top_k: 5,
            noise_threshold: -3.0,
            empty_policy: EmptyPolicy::KeepBest,
            timeout_secs: 30,
            rerank_timeout_secs: 20,
        }
    }
}

impl RetrievalSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn rerank_timeout(&self) -> Duration {
        Duration::from_secs(self.rerank_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub context_window: u32,
    pub repeat_penalty: f32,
    pub threads: Option<u32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        let options = GenerationOptions::default();
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            timeout_secs: 120,
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
            max_output_tokens: options.max_output_tokens,
            context_window: options.context_window,
            repeat_penalty: options.repeat_penalty,
            threads: options.threads,
        }
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
            context_window: self.context_window,
            repeat_penalty: self.repeat_penalty,
            threads: self.threads,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardSettings {
    pub override_min_len: usize,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self { override_min_len: 100 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    pub max_tokens: usize,
    pub overlap_percent: f32,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self { max_tokens: 500, overlap_percent: 0.2 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub embed_dir: Option<String>,
    pub rerank_dir: Option<String>,
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
