//! Wizard step definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::DomainError;

/// Number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 4;

/// One stage of the sequential wizard.
///
/// Transitions only ever move by one step; see [`Step::next`] and
/// [`Step::previous`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Step {
    /// Name, contact and birthdate
    #[default]
    BasicDetails,
    /// Identity numbers and bank details
    PersonalDetails,
    /// Document uploads and extraction
    Documents,
    /// Read-only review and final submission
    Review,
}

impl Step {
    pub const FIRST: Step = Step::BasicDetails;
    pub const LAST: Step = Step::Review;

    /// 1-based step index.
    pub fn number(&self) -> u8 {
        match self {
            Step::BasicDetails => 1,
            Step::PersonalDetails => 2,
            Step::Documents => 3,
            Step::Review => 4,
        }
    }

    pub fn from_number(n: u8) -> Result<Self, DomainError> {
        match n {
            1 => Ok(Step::BasicDetails),
            2 => Ok(Step::PersonalDetails),
            3 => Ok(Step::Documents),
            4 => Ok(Step::Review),
            _ => Err(DomainError::StepOutOfRange(n)),
        }
    }

    /// The following step, or `None` on the last one.
    pub fn next(&self) -> Option<Step> {
        Step::from_number(self.number() + 1).ok()
    }

    /// The preceding step, or `None` on the first one.
    pub fn previous(&self) -> Option<Step> {
        self.number()
            .checked_sub(1)
            .and_then(|n| Step::from_number(n).ok())
    }

    pub fn is_last(&self) -> bool {
        *self == Step::LAST
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::BasicDetails => "Basic Details",
            Step::PersonalDetails => "Personal Details",
            Step::Documents => "Documents",
            Step::Review => "Review & Submit",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {}/{}: {}",
            self.number(),
            TOTAL_STEPS,
            self.title()
        )
    }
}
