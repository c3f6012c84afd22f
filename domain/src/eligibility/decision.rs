//! Eligibility decision types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::checks::EligibilityChecks;

/// Stored outcome of a final submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub eligible: bool,
    pub checks: EligibilityChecks,
    pub timestamp: DateTime<Utc>,
}

/// Decision payload for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionNotice {
    pub eligible: bool,
    pub title: String,
    pub message: String,
    /// Actionable hints, only present when not eligible
    pub guidance: Vec<String>,
}

impl DecisionNotice {
    pub fn for_result(result: &VerificationResult, first_name: &str) -> Self {
        if result.eligible {
            Self {
                eligible: true,
                title: "Verification Successful!".to_string(),
                message: format!(
                    "Congratulations {first_name}! Your KYC verification has been completed \
                     successfully. All your documents and information have been verified. \
                     You are now eligible to proceed with our services."
                ),
                guidance: Vec::new(),
            }
        } else {
            Self {
                eligible: false,
                title: "Verification Failed".to_string(),
                message: format!(
                    "Sorry {first_name}, we couldn't verify your KYC details. \
                     Please update your information and try again."
                ),
                guidance: vec![
                    "Ensure all document formats are correct".to_string(),
                    "Verify that you're 18 years or older".to_string(),
                    "Check PAN, Aadhar, and IFSC codes are valid".to_string(),
                ],
            }
        }
    }
}
