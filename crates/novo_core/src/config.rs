use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::persona::{DEFAULT_GREETING, DEFAULT_NAME};

/// Key the conversation log is stored under in the key-value backend.
pub const DEFAULT_STORAGE_KEY: &str = "novo_chatbot_data";

/// Conversations kept in memory and persisted.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NovoConfig {
    pub bot: BotConfig,
    pub memory: MemoryConfig,
    pub storage: StorageConfig,
}

impl NovoConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse TOML config")
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `NOVO_*` overrides from an arbitrary lookup. Unparsable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("NOVO_BACKEND") {
            match v.parse() {
                Ok(kind) => self.storage.backend = kind,
                Err(e) => tracing::warn!("Ignoring NOVO_BACKEND: {}", e),
            }
        }
        if let Some(v) = lookup("NOVO_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("NOVO_STORAGE_KEY") {
            self.storage.key = v;
        }
        if let Some(v) = lookup("NOVO_HISTORY_LIMIT") {
            match v.parse::<usize>() {
                Ok(n) if n > 0 => self.memory.history_limit = n,
                _ => tracing::warn!("Ignoring NOVO_HISTORY_LIMIT={:?}: expected a positive integer", v),
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub name: String,
    pub greeting: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Rolling history size; the oldest conversation is evicted past this.
    pub history_limit: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: BackendKind,
    /// Directory for file/sqlite backends. `None` lets the front-end pick a
    /// platform default.
    pub data_dir: Option<PathBuf>,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            data_dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Process-local only; nothing survives a restart.
    Memory,
    /// One JSON file per key under `data_dir`.
    #[default]
    File,
    /// `kv_store` table in `data_dir/novo.db`.
    Sqlite,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "file" => Ok(BackendKind::File),
            "sqlite" => Ok(BackendKind::Sqlite),
            other => Err(format!("unknown backend '{}' (expected memory, file or sqlite)", other)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::Memory => "memory",
            BackendKind::File => "file",
            BackendKind::Sqlite => "sqlite",
        })
    }
}
