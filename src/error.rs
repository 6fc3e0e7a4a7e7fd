use std::io;

use thiserror::Error;

use crate::assets::AssetError;
use crate::config::ConfigError;

/// Failures that stop the game from starting or running.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed")]
    Terminal(#[from] io::Error),
}
