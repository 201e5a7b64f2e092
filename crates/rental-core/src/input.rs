//! # Input Formatting
//!
//! Keystroke normalization for the payment form. Each function takes the
//! raw text of a field and returns what the field should display.
//!
//! ```text
//! "4111-1111 1111x1111"  ──► format_card_number ──► "4111 1111 1111 1111"
//! "12 / 25"              ──► format_expiry      ──► "12/25"
//! "12a34"                ──► format_cvv         ──► "123"
//! ```
//!
//! These never fail. Whether the result is acceptable is decided by
//! [`validation`](crate::validation) when the step is submitted.

use crate::{CARD_NUMBER_MAX_CHARS, CVV_DIGITS, EXPIRY_MAX_CHARS};

fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Groups card digits in fours separated by single spaces.
///
/// Non-digits are dropped first. The result is capped at 19 characters,
/// i.e. four groups of four.
///
/// ```rust
/// use rental_core::input::format_card_number;
///
/// assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
/// assert_eq!(format_card_number("41111"), "4111 1");
/// ```
pub fn format_card_number(raw: &str) -> String {
    let digits = digits_only(raw);

    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(ch);
    }

    formatted.chars().take(CARD_NUMBER_MAX_CHARS).collect()
}

/// Formats an expiry as `MM/YY`.
///
/// The slash only appears once a third digit exists, so a user typing
/// `1` then `2` sees `1`, `12`, `12/2`, `12/25`.
///
/// ```rust
/// use rental_core::input::format_expiry;
///
/// assert_eq!(format_expiry("1225"), "12/25");
/// assert_eq!(format_expiry("1"), "1");
/// ```
pub fn format_expiry(raw: &str) -> String {
    let digits = digits_only(raw);

    let formatted = if digits.len() > 2 {
        let (month, rest) = digits.split_at(2);
        format!("{}/{}", month, rest)
    } else {
        digits
    };

    formatted.chars().take(EXPIRY_MAX_CHARS).collect()
}

/// Keeps the first three digits.
pub fn format_cvv(raw: &str) -> String {
    digits_only(raw).chars().take(CVV_DIGITS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111 1111 1111 1111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-abcd-1111"), "4111 1111");
        assert_eq!(format_card_number("1234"), "1234");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_format_card_number_caps_at_four_groups() {
        let formatted = format_card_number("12345678901234567890");
        assert_eq!(formatted, "1234 5678 9012 3456");
        assert_eq!(formatted.len(), 19);
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("1299"), "12/99");
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12");
        assert_eq!(format_expiry("123"), "12/3");
        assert_eq!(format_expiry("12/25"), "12/25");
        assert_eq!(format_expiry("122599"), "12/25");
        assert_eq!(format_expiry("ab"), "");
    }

    #[test]
    fn test_format_cvv() {
        assert_eq!(format_cvv("123"), "123");
        assert_eq!(format_cvv("12a34"), "123");
        assert_eq!(format_cvv("9"), "9");
        assert_eq!(format_cvv("xyz"), "");
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let card = format_card_number("4111111111111111");
        assert_eq!(format_card_number(&card), card);
        let expiry = format_expiry("0828");
        assert_eq!(format_expiry(&expiry), expiry);
    }
}
