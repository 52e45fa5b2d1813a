//! Configuration via `lexset.toml`
//!
//! One file holds the sorted-set connection parameters and the corpus
//! locations. Every field has a default, so an empty file (or a missing
//! section) is valid. `write_default_if_missing` drops a commented template
//! next to the binary on first use.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use lexset_core::limits::DEFAULT_MAX_ENTRY_BYTES;
use lexset_core::{LexsetError, LexsetResult, Limits};
use lexset_storage::{RedisParams, DEFAULT_SET_NAME};

use crate::loader::{LoadOptions, DEFAULT_BATCH_SIZE};

/// Config file name looked up when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "lexset.toml";

/// Which sorted-set backend to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Redis server reached over TCP
    Redis,
    /// Process-local in-memory set; contents vanish at exit
    Memory,
}

/// `[store]` section: where the index lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend: `"redis"` (default) or `"memory"`.
    pub backend: String,
    /// Redis host.
    pub host: String,
    /// Redis port.
    pub port: u16,
    /// Redis password; empty means no `AUTH`.
    pub password: String,
    /// Logical database number.
    pub db: i64,
    /// Name of the sorted set holding the index.
    pub set_name: String,
    /// Extra attempts per failed store call (0 = fail fast).
    pub retries: u32,
    /// Pause between attempts in milliseconds.
    pub retry_backoff_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let redis = RedisParams::default();
        Self {
            backend: "redis".to_string(),
            host: redis.host,
            port: redis.port,
            password: String::new(),
            db: redis.db,
            set_name: DEFAULT_SET_NAME.to_string(),
            retries: 0,
            retry_backoff_ms: 200,
        }
    }
}

impl StoreConfig {
    /// Parse the backend string.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the string is not `"redis"` or `"memory"`.
    pub fn backend(&self) -> LexsetResult<Backend> {
        match self.backend.as_str() {
            "redis" => Ok(Backend::Redis),
            "memory" => Ok(Backend::Memory),
            other => Err(LexsetError::configuration(format!(
                "Invalid store backend '{}'. Expected \"redis\" or \"memory\".",
                other
            ))),
        }
    }

    /// Connection parameters for the Redis backend.
    pub fn redis_params(&self) -> RedisParams {
        RedisParams {
            host: self.host.clone(),
            port: self.port,
            password: if self.password.is_empty() {
                None
            } else {
                Some(self.password.clone())
            },
            db: self.db,
        }
    }

    /// Pause between retry attempts.
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// `[data]` section: where the corpus comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding source files (plain text or archives).
    pub source_dir: PathBuf,
    /// Directory archives are expanded into.
    pub scratch_dir: PathBuf,
    /// Keys per `ZADD` round trip (0 = one batch per file).
    pub batch_size: usize,
    /// Longest accepted line in bytes.
    pub max_entry_bytes: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./data"),
            scratch_dir: PathBuf::from("./tmp"),
            batch_size: DEFAULT_BATCH_SIZE,
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        }
    }
}

impl DataConfig {
    /// Loader options derived from this section.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            batch_size: self.batch_size,
            clear_first: false,
            limits: Limits {
                max_entry_bytes: self.max_entry_bytes,
            },
        }
    }
}

/// Configuration loaded from `lexset.toml`.
///
/// # Example
///
/// ```toml
/// [store]
/// host = "127.0.0.1"
/// port = 6379
///
/// [data]
/// source_dir = "./data"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LexsetConfig {
    /// Sorted-set connection settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Corpus locations and load tuning.
    #[serde(default)]
    pub data: DataConfig,
}

impl LexsetConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# lexset configuration

[store]
# "redis" (default) or "memory" (process-local, useful for one-shot runs)
backend = "redis"
host = "127.0.0.1"
port = 6379
# Leave empty to skip AUTH
password = ""
db = 0
set_name = "string_search_zset"
# Extra attempts per failed store call; 0 keeps loads fail-fast
retries = 0
retry_backoff_ms = 200

[data]
# Directory with one-entry-per-line text files (.zip and .tar.zst accepted)
source_dir = "./data"
# Archives are expanded here and removed after loading
scratch_dir = "./tmp"
# Keys per round trip; 0 sends each file as a single batch
batch_size = 10000
max_entry_bytes = 65536
"#
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or names an unknown backend.
    pub fn parse(content: &str) -> LexsetResult<Self> {
        let config: LexsetConfig = toml::from_str(content)
            .map_err(|e| LexsetError::configuration(format!("Failed to parse config: {}", e)))?;
        // Validate the backend value eagerly
        config.store.backend()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> LexsetResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LexsetError::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content).map_err(|e| match e {
            LexsetError::Configuration { reason } => LexsetError::configuration(format!(
                "{} (in '{}')",
                reason,
                path.display()
            )),
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> LexsetResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                LexsetError::configuration(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
