//! Console output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// Raw `[output]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Animate a spinner while the decision is computed
    pub spinner: bool,
    /// Print the command list when the wizard starts
    pub show_help: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            spinner: true,
            show_help: true,
        }
    }
}
