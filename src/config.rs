//! Runtime configuration
//!
//! Everything comes from `FOODLOG_*` environment variables. Unset variables
//! fall back to defaults; set but unparsable ones are an error.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::ledger::DuplicatePolicy;
use crate::search::{SearchSettings, DEFAULT_BASE_URL};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Key from the environment; takes precedence over the stored key
    pub api_key: Option<String>,
    pub key_path: PathBuf,
    pub fdc_base_url: String,
    pub search: SearchSettings,
    pub duplicate_policy: DuplicatePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let debounce_ms: u64 = parse_or(&lookup, "FOODLOG_DEBOUNCE_MS", 300)?;
        let min_query_len: usize = parse_or(&lookup, "FOODLOG_MIN_QUERY_LEN", 3)?;
        let duplicate_policy = parse_or(&lookup, "FOODLOG_DUPLICATE_POLICY", DuplicatePolicy::Reject)?;

        Ok(Self {
            api_key: lookup("FOODLOG_API_KEY")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            key_path: lookup("FOODLOG_KEY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_key_path),
            fdc_base_url: lookup("FOODLOG_FDC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            search: SearchSettings {
                debounce: Duration::from_millis(debounce_ms),
                min_query_len,
            },
            duplicate_policy,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default");
            Ok(default)
        }
    }
}

/// `data/api_key` next to the project root when run from `target/`
fn default_key_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(root) = path.parent().and_then(|target| target.parent()) {
            path = root.to_path_buf();
        }
    }

    path.push("data");
    path.push("api_key");
    path
}
