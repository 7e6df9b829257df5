//! Daemon configuration loaded from environment variables.
//!
//! - `ATTENDANCED_WORKSPACE` - open this workspace at startup (optional)
//! - `ATTENDANCED_QUOTA_BYTES` - cap on total stored bytes (optional, no cap when unset)
//! - `ATTENDANCED_SEED` - populate default records into empty collections (default: true)
//! - `RUST_LOG` - log filter (default: `attendanced=info`)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub workspace: Option<PathBuf>,
    pub quota_bytes: Option<usize>,
    pub seed_defaults: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: None,
            quota_bytes: None,
            seed_defaults: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let workspace = get("ATTENDANCED_WORKSPACE").map(PathBuf::from);

        let quota_bytes = match get("ATTENDANCED_QUOTA_BYTES") {
            None => None,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(ConfigError::InvalidEnvVar(
                        "ATTENDANCED_QUOTA_BYTES".to_string(),
                        format!("expected a positive integer, got {raw:?}"),
                    ))
                }
            },
        };

        let seed_defaults = match get("ATTENDANCED_SEED") {
            None => true,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "ATTENDANCED_SEED".to_string(),
                    format!("expected true or false, got {raw:?}"),
                )
            })?,
        };

        Ok(Self {
            workspace,
            quota_bytes,
            seed_defaults,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
