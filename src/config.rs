//! Runtime configuration, read from `config.toml` in the game directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";
const GAME_DIR: &str = ".floatipop";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("frame_rate must be between 1 and 1000, got {0}")]
    FrameRate(u32),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Target frames per second.
    pub frame_rate: u32,
    /// Directory of `<name>.txt` sprites. Built-in sprites when unset.
    pub data_dir: Option<PathBuf>,
    /// Where high scores and the log live. Defaults to the game directory.
    pub score_dir: Option<PathBuf>,
    /// Start each run with a platform to stand on.
    pub start_platform: bool,
    /// `tracing` filter used when `FLOATIPOP_LOG` is not set.
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame_rate: 60,
            data_dir: None,
            score_dir: None,
            start_platform: false,
            log_filter: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Read `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        if config.frame_rate == 0 || config.frame_rate > 1000 {
            return Err(ConfigError::FrameRate(config.frame_rate));
        }
        Ok(config)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }

    /// Directory for the score file and the log.
    pub fn score_dir(&self) -> PathBuf {
        self.score_dir.clone().unwrap_or_else(default_game_dir)
    }
}

/// `$HOME/.floatipop`, or `%APPDATA%\.floatipop` on Windows. Falls back to
/// the working directory when neither can be resolved.
pub fn default_game_dir() -> PathBuf {
    let base = if cfg!(windows) {
        dirs::data_dir()
    } else {
        dirs::home_dir()
    };
    base.unwrap_or_else(|| PathBuf::from(".")).join(GAME_DIR)
}
