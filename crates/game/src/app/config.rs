use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use sprite_stage::{LoopConfig, StageConfig};
use thiserror::Error;
use tracing::info;

use super::plane::PlaneConfig;
use super::typing::TypingConfig;

pub(crate) const CONFIG_ENV_VAR: &str = "PLANE_RAID_CONFIG";
pub(crate) const MODE_ENV_VAR: &str = "PLANE_RAID_MODE";
const CONFIG_FILE_NAME: &str = "game.json";
pub(crate) const BUILTIN_CONFIG: &str = include_str!("../../../../assets/game.json");

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {origin} at {json_path}: {source}")]
    Parse {
        origin: String,
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("unknown game mode '{0}', expected 'plane' or 'typing'")]
    UnknownMode(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum GameMode {
    #[default]
    Plane,
    Typing,
}

impl FromStr for GameMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "plane" => Ok(Self::Plane),
            "typing" => Ok(Self::Typing),
            _ => Err(ConfigError::UnknownMode(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GameConfig {
    #[serde(default)]
    pub(crate) mode: GameMode,
    #[serde(default)]
    pub(crate) stage: StageConfig,
    #[serde(default)]
    pub(crate) window: LoopConfig,
    pub(crate) plane: PlaneConfig,
    pub(crate) typing: TypingConfig,
}

/// Reads `PLANE_RAID_CONFIG`, else `<assets>/game.json`, else the copy built
/// into the binary. `PLANE_RAID_MODE` overrides the configured mode.
pub(crate) fn load_game_config(assets_dir: &Path) -> Result<GameConfig, ConfigError> {
    let mut config = match config_path(assets_dir)? {
        Some(path) => {
            let config = read_config_file(&path)?;
            info!(path = %path.display(), "config_loaded");
            config
        }
        None => {
            let config = parse_game_config(BUILTIN_CONFIG, "<builtin>")?;
            info!(path = "<builtin>", "config_loaded");
            config
        }
    };

    if let Some(mode) = read_env(MODE_ENV_VAR)? {
        config.mode = mode.parse()?;
    }
    Ok(config)
}

fn config_path(assets_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(explicit) = read_env(CONFIG_ENV_VAR)? {
        return Ok(Some(PathBuf::from(explicit)));
    }
    let default = assets_dir.join(CONFIG_FILE_NAME);
    Ok(default.is_file().then_some(default))
}

fn read_env(var: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source) => Err(ConfigError::EnvVar { var, source }),
    }
}

pub(crate) fn read_config_file(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_game_config(&raw, &path.display().to_string())
}

pub(crate) fn parse_game_config(raw: &str, origin: &str) -> Result<GameConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
        let json_path = error.path().to_string();
        ConfigError::Parse {
            origin: origin.to_string(),
            json_path,
            source: error.into_inner(),
        }
    })
}
