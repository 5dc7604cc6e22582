use plain_factory_engine::{FormatSelector, LicenseMetadata};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read license metadata at {metadata_path}: {source}")]
    MetadataReadError {
        metadata_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse license metadata at {metadata_path}: {source}")]
    MetadataParseError {
        metadata_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Defaults for the command-line driver. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Formats produced when none are requested explicitly.
    pub formats: FormatSelector,
    /// Where rendered files are written; the input's directory when unset.
    pub output_dir: Option<PathBuf>,
    /// Substituted for `{{ year }}` placeholders.
    pub year: Option<String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the output directory
        config.output_dir = config
            .output_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/plain-factory");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// Reads one license's metadata document.
pub fn load_metadata<P: AsRef<Path>>(metadata_path: P) -> Result<LicenseMetadata, ConfigError> {
    let metadata_path = metadata_path.as_ref();
    let content = std::fs::read_to_string(metadata_path).map_err(|source| {
        ConfigError::MetadataReadError {
            metadata_path: metadata_path.to_path_buf(),
            source,
        }
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::MetadataParseError {
        metadata_path: metadata_path.to_path_buf(),
        source,
    })
}
