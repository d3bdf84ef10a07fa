use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; see the defaults below.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory for the file-backed key-value store.
    pub storage_dir: PathBuf,
    /// When set, persistence goes to Redis instead of `storage_dir`.
    pub redis_url: Option<String>,
    /// When set, every saved export is also written here as `resume.pdf`.
    pub export_dir: Option<PathBuf>,
    /// Free-export credit for a session with nothing persisted.
    pub free_exports: u32,
    /// Delay between hiding chrome and capture.
    pub export_settle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            storage_dir: PathBuf::from(".cvcraft"),
            redis_url: None,
            export_dir: None,
            free_exports: 1,
            export_settle_ms: 50,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            storage_dir: optional_env("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            redis_url: optional_env("REDIS_URL"),
            export_dir: optional_env("EXPORT_DIR").map(PathBuf::from),
            free_exports: parse_env("FREE_EXPORTS", defaults.free_exports)?,
            export_settle_ms: parse_env("EXPORT_SETTLE_MS", defaults.export_settle_ms)?,
        })
    }
}

/// Non-empty value of `key`, if set.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
