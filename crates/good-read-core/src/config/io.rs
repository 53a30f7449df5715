use super::models::ServiceConfig;
use super::tables::ConfigTables;
use crate::segmenter::LimitError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid extraction settings: {0}")]
    Limit(#[from] LimitError),
}

/// Load and validate the config at `path`.
///
/// A missing file is not an error: every setting takes its default.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded service config");
            data
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Config file not found, using defaults");
            let config = ServiceConfig::default();
            config.validate()?;
            return Ok(config);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<ServiceConfig, ConfigError> {
    let tables: ConfigTables = toml::from_str(contents)?;
    let config = ServiceConfig::from(tables);
    config.validate()?;
    debug!(?config, "Parsed configuration");
    Ok(config)
}

pub fn serialize_config(config: &ServiceConfig) -> Result<String, ConfigError> {
    let tables = ConfigTables::from(config);
    Ok(toml::to_string(&tables)?)
}
