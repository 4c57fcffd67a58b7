//! Configuration for sportcast.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SPORTCAST_HOME, SPORTCAST_STORAGE_KEY)
//! 2. Config file (.sportcast/config.yaml)
//! 3. Defaults (~/.sportcast)
//!
//! Config file discovery:
//! - Searches current directory and parents for .sportcast/config.yaml
//! - `paths.home` is relative to the .sportcast/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::DEFAULT_THUMBNAIL;
use crate::store::STORAGE_KEY;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Environment variable overriding the home directory
pub const ENV_HOME: &str = "SPORTCAST_HOME";

/// Environment variable overriding the slot key
pub const ENV_STORAGE_KEY: &str = "SPORTCAST_STORAGE_KEY";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    #[serde(default)]
    pub player: Option<PlayerConfig>,
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Slot directory (relative to the .sportcast/ directory)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    pub probe_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub default_thumbnail: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding the slot files
    pub home: PathBuf,
    /// Slot key the catalog is stored under
    pub storage_key: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Player settings
    pub player: PlayerSettings,
    /// Thumbnail used for streams added without one
    pub default_thumbnail: String,
}

#[derive(Debug, Clone)]
pub struct PlayerSettings {
    pub probe_timeout_seconds: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            probe_timeout_seconds: 10,
        }
    }
}

impl PlayerSettings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }
}

impl ResolvedConfig {
    /// Path of the catalog slot file
    pub fn slot_path(&self) -> PathBuf {
        self.home.join(format!("{}.json", self.storage_key))
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".sportcast").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge a parsed config file (if any) with env overrides and defaults
fn resolve(
    config_file: Option<(PathBuf, ConfigFile)>,
    env_home: Option<String>,
    env_key: Option<String>,
    default_home: PathBuf,
) -> ResolvedConfig {
    let Some((config_path, config)) = config_file else {
        return ResolvedConfig {
            home: env_home.map(PathBuf::from).unwrap_or(default_home),
            storage_key: env_key.unwrap_or_else(|| STORAGE_KEY.to_string()),
            config_file: None,
            player: PlayerSettings::default(),
            default_thumbnail: DEFAULT_THUMBNAIL.to_string(),
        };
    };

    // home is relative to the .sportcast/ directory
    let home = if let Some(env_home) = env_home {
        PathBuf::from(env_home)
    } else if let Some(ref home_path) = config.paths.home {
        let sportcast_dir = config_path.parent().unwrap_or(Path::new("."));
        resolve_path(sportcast_dir, home_path)
    } else {
        default_home
    };

    let storage_key = env_key
        .or_else(|| config.storage.as_ref().and_then(|s| s.key.clone()))
        .unwrap_or_else(|| STORAGE_KEY.to_string());

    let player = PlayerSettings {
        probe_timeout_seconds: config
            .player
            .as_ref()
            .and_then(|p| p.probe_timeout_seconds)
            .unwrap_or(PlayerSettings::default().probe_timeout_seconds),
    };

    let default_thumbnail = config
        .admin
        .as_ref()
        .and_then(|a| a.default_thumbnail.clone())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_THUMBNAIL.to_string());

    ResolvedConfig {
        home,
        storage_key,
        config_file: Some(config_path),
        player,
        default_thumbnail,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".sportcast");

    let config_file = match find_config_file() {
        Some(path) => {
            let config = load_config_file(&path)?;
            Some((path, config))
        }
        None => None,
    };

    Ok(resolve(
        config_file,
        std::env::var(ENV_HOME).ok(),
        std::env::var(ENV_STORAGE_KEY).ok(),
        default_home,
    ))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the sportcast home directory (slot files).
pub fn sportcast_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the configured slot key
pub fn storage_key() -> Result<String> {
    Ok(config()?.storage_key.clone())
}
