//! Configuration management for Pathwise.
//!
//! Settings live in `pathwise.toml`. Every field has a default, so a missing
//! file or a partial file is fine.

use anyhow::{bail, Context, Result};
use pathwise_rank::semantic::TOPIC_PLACEHOLDER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up by [`Config::load`].
pub const CONFIG_FILE: &str = "pathwise.toml";

/// Pathwise deployment configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub embedder: EmbedderConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Directory relative data paths are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    /// Topic graph JSON. Empty: built-in curriculum.
    #[serde(default)]
    pub graph_path: String,
    /// Ranker model JSON. Empty: semantic-only scoring.
    #[serde(default)]
    pub model_path: String,
}

/// Which query encoder to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderKind {
    Precomputed,
    Hash,
    Api,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedderConfig {
    #[serde(default = "default_embedder_kind")]
    pub kind: EmbedderKind,
    /// Precomputed query table.
    #[serde(default = "default_embeddings_path")]
    pub path: String,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// OpenAI-compatible `/embeddings` URL.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_title_weight")]
    pub title_weight: f64,
    #[serde(default = "default_description_weight")]
    pub description_weight: f64,
    #[serde(default = "default_query_template")]
    pub query_template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_catalog_path() -> String { "datasets/resources_with_embeddings.csv".to_string() }
fn default_embedder_kind() -> EmbedderKind { EmbedderKind::Precomputed }
fn default_embeddings_path() -> String { "datasets/query_embeddings.json".to_string() }
fn default_dimension() -> usize { 768 }
fn default_model() -> String { "all-mpnet-base-v2".to_string() }
fn default_api_key_env() -> String { "PATHWISE_EMBEDDING_API_KEY".to_string() }
fn default_alpha() -> f64 { 0.5 }
fn default_top_k() -> usize { 3 }
fn default_title_weight() -> f64 { 0.3 }
fn default_description_weight() -> f64 { 0.7 }
fn default_query_template() -> String { format!("{} tutorial", TOPIC_PLACEHOLDER) }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            graph_path: String::new(),
            model_path: String::new(),
        }
    }
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            kind: default_embedder_kind(),
            path: default_embeddings_path(),
            dimension: default_dimension(),
            endpoint: String::new(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            top_k: default_top_k(),
            title_weight: default_title_weight(),
            description_weight: default_description_weight(),
            query_template: default_query_template(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load config from pathwise.toml in the current or parent directories,
    /// falling back to defaults when there is none.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from an explicit path. Relative data paths in the file
    /// resolve against the file's directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Generate default config as TOML string.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize config")
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let ranking = &self.ranking;
        if !(0.0..=1.0).contains(&ranking.alpha) {
            bail!("ranking.alpha must be within [0, 1], got {}", ranking.alpha);
        }
        if ranking.top_k == 0 {
            bail!("ranking.top_k must be at least 1");
        }
        if !ranking.title_weight.is_finite() || !ranking.description_weight.is_finite() {
            bail!("ranking weights must be finite");
        }
        if !ranking.query_template.contains(TOPIC_PLACEHOLDER) {
            bail!(
                "ranking.query_template must contain {}, got {:?}",
                TOPIC_PLACEHOLDER,
                ranking.query_template
            );
        }
        if self.data.catalog_path.trim().is_empty() {
            bail!("data.catalog_path must be set");
        }
        if self.embedder.kind == EmbedderKind::Hash && self.embedder.dimension == 0 {
            bail!("embedder.dimension must be at least 1");
        }
        Ok(())
    }

    /// Resolve a configured path. Empty means unset.
    pub fn resolve_path(&self, raw: &str) -> Option<PathBuf> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let path = PathBuf::from(raw);
        match &self.base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path),
        }
    }
}

/// Find pathwise.toml in current or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_from(&std::env::current_dir().ok()?)
}

/// Find pathwise.toml in `start` or any of its ancestors.
pub fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
