//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when `CHAIRBOOK_DB_PATH` is set
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//! 3. JSON and TOML are both accepted, chosen by file extension
//!
//! Whatever the source, the result is checked with
//! [`Config::validate`](chairbook_domain::Config::validate).
//!
//! ## Environment Variables
//! - `CHAIRBOOK_DB_PATH`: database file path (required)
//! - `CHAIRBOOK_DB_POOL_SIZE`: connection pool size
//! - `CHAIRBOOK_DB_BUSY_TIMEOUT_MS`: how long a writer waits for the lock
//! - `CHAIRBOOK_LOG_LEVEL`: default tracing filter
//! - `CHAIRBOOK_LOG_JSON`: emit JSON log lines (true/false)
//!
//! The opening grid is only configurable through a file.
//!
//! ## File Locations
//! The loader probes, in order, the current directory and up to two parent
//! directories, then the same relative to the executable, for
//! `config.{json,toml}` and `chairbook.{json,toml}`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chairbook_domain::{ChairbookError, Config, DatabaseConfig, LoggingConfig, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "chairbook.json", "chairbook.toml"];

/// Load configuration from the environment, falling back to a file.
///
/// # Errors
/// Returns `ChairbookError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `CHAIRBOOK_*` environment variables.
///
/// Only `CHAIRBOOK_DB_PATH` is required; everything else falls back to the
/// defaults.
///
/// # Errors
/// Returns `ChairbookError::Config` if the path is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let config = Config {
        database: DatabaseConfig {
            path: env_var("CHAIRBOOK_DB_PATH")?,
            pool_size: env_parse("CHAIRBOOK_DB_POOL_SIZE", defaults.database.pool_size)?,
            busy_timeout_ms: env_parse(
                "CHAIRBOOK_DB_BUSY_TIMEOUT_MS",
                defaults.database.busy_timeout_ms,
            )?,
        },
        schedule: defaults.schedule,
        logging: LoggingConfig {
            level: std::env::var("CHAIRBOOK_LOG_LEVEL").unwrap_or(defaults.logging.level),
            json: env_bool("CHAIRBOOK_LOG_JSON", defaults.logging.json),
        },
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `ChairbookError::Config` if the file is missing, unreadable,
/// malformed or fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ChairbookError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ChairbookError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ChairbookError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse by extension: `.toml` or `.json` (the default when there is none).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ChairbookError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ChairbookError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ChairbookError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file in the standard locations, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ChairbookError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional variable, using `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ChairbookError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`
/// (case-insensitive); `default` when unset.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
