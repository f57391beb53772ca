//! TOML settings file, `config.toml` under the platform config directory
//! (see [`dirs::config_dir`]). Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::player::FallbackOrder;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playback engine settings
    pub engine: EngineConfig,

    /// Queue panel settings
    pub panel: PanelConfig,

    /// Library settings
    pub library: LibraryConfig,
}

/// Playback engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// What the engine plays when the queue has nothing in that direction
    pub fallback: FallbackOrder,
}

/// Queue panel settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Show the queue panel when a session starts
    pub open_on_start: bool,
}

/// Library settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Catalog file (built-in demo catalog when unset)
    pub catalog: Option<PathBuf>,
}

/// `<config_dir>/play-queue`
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("play-queue"))
}

/// `<config_dir>/play-queue/config.toml`
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load the config from the OS config directory. Never fails.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!("No config directory on this system, using defaults");
            Config::default()
        }
    }
}

/// Load the config at `path`. Missing or broken files yield defaults.
pub fn load_from(path: &Path) -> Config {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{:?} does not exist, using defaults", path);
            return Config::default();
        }
        Err(e) => {
            tracing::error!("Cannot read {:?}: {}", path, e);
            return Config::default();
        }
    };

    toml::from_str::<Config>(&contents)
        .inspect(|_| tracing::info!("Loaded config from {:?}", path))
        .unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
            Config::default()
        })
}

/// Write the config to the OS config directory and return where it went.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(&path, config)?;
    Ok(path)
}

/// Write the config to `path`, creating parent directories.
///
/// The file is replaced in one step, so readers never see a partial write.
pub fn save_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
            dir: dir.to_path_buf(),
            source,
        })?;
    }

    let staged = path.with_extension("toml.tmp");
    std::fs::write(&staged, contents).map_err(|source| ConfigError::Write {
        path: staged.clone(),
        source,
    })?;
    std::fs::rename(&staged, path).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

/// Failures writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config directory on this system")]
    NoConfigDir,

    #[error("cannot create {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot encode config: {0}")]
    Serialize(toml::ser::Error),

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
