//! Field format checks.
//!
//! Pure predicates over single values. Code patterns expect upper-case
//! input; callers normalize before checking (see
//! [`FieldId::normalize_capture`](crate::wizard::field::FieldId::normalize_capture)).

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::core::string::parse_input_date;

/// Minimum age for eligibility, in whole years.
pub const MINIMUM_AGE: i32 = 18;

/// Required number of digits in a phone number.
pub const PHONE_DIGITS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Five letters, four digits, one letter.
pub static IDENTITY_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid PAN pattern"));

/// Exactly twelve digits.
pub static NATIONAL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("valid Aadhaar pattern"));

/// Four letters, a literal zero, six alphanumerics.
pub static BANK_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid IFSC pattern"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_identity_number(value: &str) -> bool {
    IDENTITY_NUMBER_RE.is_match(value)
}

pub fn is_valid_national_id(value: &str) -> bool {
    NATIONAL_ID_RE.is_match(value)
}

pub fn is_valid_bank_code(value: &str) -> bool {
    BANK_CODE_RE.is_match(value)
}

/// Exactly ten ASCII digits.
pub fn is_valid_phone(value: &str) -> bool {
    value.len() == PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}

/// Calendar age in whole years on `today`.
///
/// The year difference is reduced by one when `today`'s month/day falls
/// before the birthday's month/day.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Whether a `YYYY-MM-DD` birthdate makes the holder at least
/// [`MINIMUM_AGE`] on `today`. Unparseable dates fail.
pub fn is_adult_on(birth_date: &str, today: NaiveDate) -> bool {
    parse_input_date(birth_date).is_some_and(|birth| age_on(birth, today) >= MINIMUM_AGE)
}
