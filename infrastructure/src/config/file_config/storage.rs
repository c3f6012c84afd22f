//! Draft storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory for the saved draft (unset = platform data directory)
    pub dir: Option<PathBuf>,
    /// Keep the draft in memory only
    pub ephemeral: bool,
}
