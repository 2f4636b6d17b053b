use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default seconds between admin board refreshes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;

/// Default mailbox size of each store actor.
pub const DEFAULT_CHANNEL_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the collections live and how often sessions poll them.
///
/// Every field is optional in a config file; missing ones keep their default
/// and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Directory holding the three collection files.
    pub data_dir: PathBuf,
    pub menu_file: String,
    pub orders_file: String,
    pub feedback_file: String,
    pub refresh_interval_secs: u64,
    pub channel_buffer: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            menu_file: "menu.json".to_string(),
            orders_file: "orders.json".to_string(),
            feedback_file: "feedback.json".to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

impl DeskConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn menu_path(&self) -> PathBuf {
        self.data_dir.join(&self.menu_file)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(&self.orders_file)
    }

    pub fn feedback_path(&self) -> PathBuf {
        self.data_dir.join(&self.feedback_file)
    }

    /// Never zero: a zero-period interval cannot tick.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}
