//! Read-only projection of a draft for the review step.

use serde::Serialize;

use super::entities::Draft;
use crate::core::string::{format_display_date, mask_account_number, mask_national_id};

/// What the review step shows. Sensitive numbers are masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub identity_number: String,
    pub national_id_number: String,
    pub account_number: String,
    pub bank_code: String,
    pub bank_name: String,
}

impl ReviewSummary {
    pub fn from_draft(draft: &Draft) -> Self {
        let basic = &draft.basic_details;
        let personal = &draft.personal_details;
        Self {
            full_name: format!("{} {}", basic.first_name, basic.last_name)
                .trim()
                .to_string(),
            email: basic.email.clone(),
            phone: basic.phone.clone(),
            birth_date: format_display_date(&basic.birth_date),
            identity_number: personal.identity_number.clone(),
            national_id_number: mask_national_id(&personal.national_id_number),
            account_number: mask_account_number(&personal.account_number),
            bank_code: personal.bank_code.clone(),
            bank_name: personal.bank_name.clone(),
        }
    }

    /// Labelled rows in display order.
    pub fn rows(&self) -> [(&'static str, &str); 9] {
        [
            ("Full Name", self.full_name.as_str()),
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
            ("Date of Birth", self.birth_date.as_str()),
            ("PAN Card", self.identity_number.as_str()),
            ("Aadhar Card", self.national_id_number.as_str()),
            ("Bank Account", self.account_number.as_str()),
            ("IFSC Code", self.bank_code.as_str()),
            ("Bank Name", self.bank_name.as_str()),
        ]
    }
}
