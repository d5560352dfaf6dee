//! Phone number utilities
//!
//! Numbers are normalized to E.164 before they are used as cache keys or
//! lockout scope values, so every representation of the same phone maps to
//! the same record. Iranian mobile numbers (the launch region) may be
//! entered with a local `09...` prefix.

use once_cell::sync::Lazy;
use regex::Regex;

// Iranian mobile number, with or without country code
static IRAN_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+98|0098|0)?(9\d{9})$").unwrap()
});

// International phone number (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").unwrap()
});

/// Strip common formatting characters from a phone number
fn strip_formatting(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Normalize a phone number to E.164
///
/// Iranian mobile numbers in local form (`09121234567`) are converted to
/// `+989121234567`; numbers already in E.164 are passed through. Returns
/// `None` when the input is not a recognizable phone number.
pub fn normalize_phone(phone: &str) -> Option<String> {
    let stripped = strip_formatting(phone);

    if let Some(captures) = IRAN_MOBILE_REGEX.captures(&stripped) {
        return Some(format!("+98{}", &captures[1]));
    }

    if INTERNATIONAL_PHONE_REGEX.is_match(&stripped) {
        return Some(stripped);
    }

    None
}

/// Check whether a phone number is acceptable input
pub fn is_valid_phone(phone: &str) -> bool {
    normalize_phone(phone).is_some()
}

/// Mask a phone number for logging (e.g., +9891****4567)
pub fn mask_phone(phone: &str) -> String {
    let normalized = strip_formatting(phone);
    if normalized.len() >= 9 {
        format!(
            "{}****{}",
            &normalized[0..5],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
