//! Runtime configuration
//!
//! Read once from the environment by the binaries and passed down
//! explicitly; nothing below `main` looks at process state.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::label::{ScoringTable, ScoringTableError};

pub const ENV_API_KEY: &str = "LABEL_SCANNER_API_KEY";
pub const ENV_MODEL: &str = "LABEL_SCANNER_MODEL";
pub const ENV_API_URL: &str = "LABEL_SCANNER_API_URL";
pub const ENV_MAX_TOKENS: &str = "LABEL_SCANNER_MAX_TOKENS";
pub const ENV_SCORING_TABLE: &str = "LABEL_SCANNER_SCORING_TABLE";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: u32 = 200;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Failed to read scoring table {path}: {source}")]
    ReadTable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scoring table {path}: {source}")]
    InvalidTable {
        path: PathBuf,
        #[source]
        source: ScoringTableError,
    },
}

/// Model API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<ApiKey>,
    pub model: String,
    pub api_url: String,
    pub max_tokens: u32,
    pub scoring_table_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let max_tokens = match get(ENV_MAX_TOKENS) {
            Some(value) => match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: ENV_MAX_TOKENS,
                        value,
                    })
                }
            },
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            api_key: get(ENV_API_KEY).map(ApiKey::new),
            model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_url: get(ENV_API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            max_tokens,
            scoring_table_path: get(ENV_SCORING_TABLE).map(PathBuf::from),
        })
    }

    /// The configured scoring table, or the standard one
    pub fn scoring_table(&self) -> Result<ScoringTable, ConfigError> {
        let Some(path) = &self.scoring_table_path else {
            return Ok(ScoringTable::standard());
        };

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadTable {
            path: path.clone(),
            source,
        })?;
        ScoringTable::from_json(&json).map_err(|source| ConfigError::InvalidTable {
            path: path.clone(),
            source,
        })
    }
}
