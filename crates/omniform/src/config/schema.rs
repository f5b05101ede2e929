use omniform_mapping::{AutoMapOptions, DEFAULT_THRESHOLD, FileStore, ScorerKind};
use omniform_scanner::ScanOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OmniformConfig {
    #[serde(default)]
    pub scan: ScanOptions,
    #[serde(default)]
    pub auto_map: AutoMapConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoMapConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub scorer: ScorerKind,
}

impl Default for AutoMapConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            scorer: ScorerKind::default(),
        }
    }
}

impl AutoMapConfig {
    pub fn options(&self) -> AutoMapOptions {
        AutoMapOptions::default()
            .with_threshold(self.threshold)
            .with_scorer(self.scorer.scorer())
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding saved mappings.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    FileStore::default_path()
}
