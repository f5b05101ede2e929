use super::schema::OmniformConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Files consulted when no config is given explicitly, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./omniform.yaml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".omniform").join("config.yaml"));
        }
        paths
    }

    /// Load `explicit` when given (a missing file is then an error), else the
    /// first existing file from [`ConfigLoader::search_paths`], else defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<OmniformConfig, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path).await;
        }

        match Self::search_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from(&path).await,
            None => {
                debug!("No config file found, using defaults");
                Ok(OmniformConfig::default())
            }
        }
    }

    /// Parse one file. An empty file yields the defaults.
    pub async fn load_from(path: &Path) -> Result<OmniformConfig, ConfigError> {
        debug!(path = %path.display(), "Loading config");
        let content = tokio::fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(OmniformConfig::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}
