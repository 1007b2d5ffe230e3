use infisweep_core::{BoardConfig, Seed};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::*;

pub const DEFAULT_SAVE_PATH: &str = "infisweep.save";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the save file lives.
    pub save_path: PathBuf,
    /// Whether revealed cells show their counts at startup.
    pub numbers_visible: bool,
    /// Seed of the first board, random when unset.
    pub seed: Option<Seed>,
    pub board: BoardConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            numbers_visible: true,
            seed: None,
            board: BoardConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("Loaded session config from {}", path.display());
        Self::from_toml_str(&text)
    }
}
