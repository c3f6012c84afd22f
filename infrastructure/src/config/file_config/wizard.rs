//! Wizard behavior configuration from TOML (`[wizard]` section)

use ekyc_application::WizardSettings;
use serde::{Deserialize, Serialize};

/// Raw wizard configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWizardConfig {
    /// Pause between submit and the decision, in milliseconds
    pub verification_delay_ms: u64,
}

impl Default for FileWizardConfig {
    fn default() -> Self {
        Self {
            verification_delay_ms: 2000,
        }
    }
}

impl FileWizardConfig {
    pub fn to_settings(&self) -> WizardSettings {
        WizardSettings::with_delay_millis(self.verification_delay_ms)
    }
}
