//! String utilities for the domain layer.

use chrono::NaiveDate;

/// Date format used by birthdate inputs (`YYYY-MM-DD`).
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Last `n` characters of `s` (UTF-8 safe). Shorter strings are returned whole.
pub fn last_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    let skip = count - n;
    let start = s.char_indices().nth(skip).map(|(i, _)| i).unwrap_or(0);
    &s[start..]
}

/// Mask a national-ID number, keeping the last four digits.
///
/// `"123456789012"` → `"XXXX XXXX 9012"`. Empty input stays empty.
pub fn mask_national_id(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!("XXXX XXXX {}", last_chars(value, 4))
}

/// Mask a bank account number, keeping the last four digits.
pub fn mask_account_number(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!("XXXXXX{}", last_chars(value, 4))
}

/// Parse a birthdate input.
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).ok()
}

/// Format an input date as `DD Mon YYYY`; unparseable input is echoed back.
pub fn format_display_date(value: &str) -> String {
    match parse_input_date(value) {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_national_id() {
        assert_eq!(mask_national_id("123456789012"), "XXXX XXXX 9012");
        assert_eq!(mask_national_id("12"), "XXXX XXXX 12");
        assert_eq!(mask_national_id(""), "");
    }

    #[test]
    fn test_mask_account_number() {
        assert_eq!(mask_account_number("00112233445566"), "XXXXXX5566");
        assert_eq!(mask_account_number(""), "");
    }

    #[test]
    fn test_last_chars_multibyte() {
        assert_eq!(last_chars("日本語テスト", 2), "スト");
        assert_eq!(last_chars("abc", 4), "abc");
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("1990-01-05"), "05 Jan 1990");
        assert_eq!(format_display_date("not a date"), "not a date");
    }
}
