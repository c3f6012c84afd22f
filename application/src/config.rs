//! Application-level configuration.
//!
//! This module provides configuration types that control how the wizard
//! behaves at runtime, independent of where the values came from.

use std::time::Duration;

/// Default pause between "submit" and the eligibility decision.
pub const DEFAULT_VERIFICATION_DELAY: Duration = Duration::from_millis(2000);

/// Wizard behavior configuration.
#[derive(Debug, Clone)]
pub struct WizardSettings {
    /// Artificial delay before the decision is produced.
    pub verification_delay: Duration,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            verification_delay: DEFAULT_VERIFICATION_DELAY,
        }
    }
}

impl WizardSettings {
    /// Creates settings with the verification delay given in milliseconds.
    pub fn with_delay_millis(millis: u64) -> Self {
        Self {
            verification_delay: Duration::from_millis(millis),
        }
    }

    /// Settings that decide immediately on submit.
    pub fn immediate() -> Self {
        Self {
            verification_delay: Duration::ZERO,
        }
    }
}
