use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_MODEL: &str = "google/nano-banana";
pub const DEFAULT_STYLE_GUIDE_DIR: &str = "style-guides";
pub const COMPLETION_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const IMAGE_API_KEY_ENV_VAR: &str = "REPLICATE_API_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    ConfigDirUnavailable,
    #[error("failed to read or write configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to deserialize configuration: {0}")]
    Deserialize(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat model used for style analysis and prompt enhancement.
    pub completion_model: String,
    /// Image model submitted to the prediction endpoint.
    pub image_model: String,
    /// Directory style guides are written to, relative to the working
    /// directory unless absolute.
    pub style_guide_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            style_guide_dir: DEFAULT_STYLE_GUIDE_DIR.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub config: Config,
    pub path: PathBuf,
    pub created: bool,
}

/// Loads the Stilo configuration from disk, creating a default file if absent.
pub fn load_or_init() -> Result<LoadOutcome, ConfigError> {
    let path = config_file_path()?;

    if path.exists() {
        let contents = fs::read_to_string(&path)?;
        let config = toml::from_str(&contents)?;
        Ok(LoadOutcome {
            config,
            path,
            created: false,
        })
    } else {
        let config = Config::default();
        save(&config, &path)?;
        Ok(LoadOutcome {
            config,
            path,
            created: true,
        })
    }
}

/// Persist the given Stilo configuration to disk at the provided path.
pub fn save(config: &Config, path: &Path) -> Result<(), ConfigError> {
    ensure_parent_exists(path)?;
    let serialized = toml::to_string_pretty(config)?;
    fs::write(path, serialized)?;
    Ok(())
}

fn ensure_parent_exists(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn config_file_path() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::ConfigDirUnavailable)?;
    Ok(base_dirs.home_dir().join(".stilo").join("config.toml"))
}
