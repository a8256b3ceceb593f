//! State storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which state store backs per-contact conversation state
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
    Redis,
}

/// State storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_path")]
    pub path: String,

    /// Connection URL for the redis backend
    pub redis_url: Option<String>,

    /// Expiry for redis keys in seconds; unset keeps state forever
    pub ttl_secs: Option<u64>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            StorageBackend::Memory => Ok(()),
            StorageBackend::File if self.path.trim().is_empty() => {
                Err(ValidationError::MissingRequired("STORAGE__PATH"))
            }
            StorageBackend::File => Ok(()),
            StorageBackend::Redis => match &self.redis_url {
                None => Err(ValidationError::MissingRequired("STORAGE__REDIS_URL")),
                Some(url) if !url.starts_with("redis://") && !url.starts_with("rediss://") => {
                    Err(ValidationError::InvalidRedisUrl)
                }
                Some(_) => Ok(()),
            },
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
            redis_url: None,
            ttl_secs: None,
        }
    }
}

fn default_path() -> String {
    "./data/state".to_string()
}
