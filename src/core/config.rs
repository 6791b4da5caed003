//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.interview-console/config.toml`. If missing on first
//! run, a commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::View;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub data_dir: Option<String>,
    pub start_view: Option<View>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const APP_DIR: &str = ".interview-console";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// `None` means requests are never timed out.
    pub request_timeout: Option<Duration>,
    pub data_dir: PathBuf,
    pub start_view: View,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub start_view: Option<View>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.interview-console/`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DIR))
}

/// Returns the path to `~/.interview-console/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.interview-console/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ConsoleConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ConsoleConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ConsoleConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ConsoleConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ConsoleConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Interview Console Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# data_dir = "/home/me/.interview-console"   # Or set INTERVIEW_CONSOLE_DATA_DIR
# start_view = "assistant"                   # "assistant" or "calendar"

# [backend]
# base_url = "http://localhost:8000"         # Or set INTERVIEW_API_URL
# request_timeout_secs = 60                  # Unset = wait forever
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ConsoleConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("INTERVIEW_API_URL").ok())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Data dir: CLI → env → config → ~/.interview-console → ./.interview-console
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| std::env::var("INTERVIEW_CONSOLE_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.general.data_dir.as_ref().map(PathBuf::from))
        .or_else(app_dir)
        .unwrap_or_else(|| PathBuf::from(APP_DIR));

    let start_view = cli
        .start_view
        .or(config.general.start_view)
        .unwrap_or_default();

    ResolvedConfig {
        base_url,
        request_timeout: config
            .backend
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        data_dir,
        start_view,
    }
}
