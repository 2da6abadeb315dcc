//! Field-level validators for the checkout form. Each validator accepts
//! the raw user-entered text and returns `Ok(())` or a message ready for
//! inline display next to the field. Validators never panic on input.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use thiserror::Error;

/// User-displayable rejection message for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FieldError(String);

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type FieldResult = Result<(), FieldError>;

/// Accepts card numbers matching one of the major scheme patterns:
/// 4-prefixed 13/16/19-digit, 51-55-prefixed 16-digit, 34/37-prefixed
/// 15-digit, Diners (300-305/36/38), Discover (6011/65x), and JCB
/// (2131/1800/35xxx). Whitespace is stripped first. Which scheme matched
/// is not reported; one generic message covers every rejection.
pub fn validate_card_number(raw: &str) -> FieldResult {
    let card_number: String = raw.split_whitespace().collect();
    let pattern = Regex::new(
        r"^(?:4[0-9]{12}(?:[0-9]{3})?(?:[0-9]{3})?|5[1-5][0-9]{14}|3[47][0-9]{13}|3(?:0[0-5]|[68][0-9])[0-9]{11}|6(?:011|5[0-9]{2})[0-9]{12}|(?:2131|1800|35[0-9]{3})[0-9]{11})$",
    )
    .unwrap();

    if pattern.is_match(&card_number) {
        Ok(())
    } else {
        Err(FieldError::new("Please enter a valid card number"))
    }
}

/// Requires the exact `MM/YY` shape, then rejects expiries strictly
/// before `today`'s month. Two-digit years compare numerically; the
/// valid horizon of a card sits well inside one century.
pub fn validate_expiry_date(raw: &str, today: NaiveDate) -> FieldResult {
    let pattern = Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").unwrap();
    let Some(captures) = pattern.captures(raw) else {
        return Err(FieldError::new("Please enter a valid expiry date (MM/YY)"));
    };

    let month: u32 = captures[1].parse().unwrap_or(0);
    let year: i32 = captures[2].parse().unwrap_or(0);
    let current_year = today.year() % 100;
    let current_month = today.month();

    if year < current_year || (year == current_year && month < current_month) {
        return Err(FieldError::new("Card has expired"));
    }

    Ok(())
}

pub fn validate_cvv(raw: &str) -> FieldResult {
    let pattern = Regex::new(r"^[0-9]{3,4}$").unwrap();

    if pattern.is_match(raw) {
        Ok(())
    } else {
        Err(FieldError::new("Please enter a valid CVV"))
    }
}

pub fn validate_required(label: &str, raw: &str) -> FieldResult {
    if raw.trim().is_empty() {
        Err(FieldError::new(format!("{label} is required")))
    } else {
        Ok(())
    }
}

pub fn validate_email(raw: &str) -> FieldResult {
    let pattern = Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap();

    if pattern.is_match(raw) {
        Ok(())
    } else {
        Err(FieldError::new("Invalid email address"))
    }
}

pub fn validate_phone(raw: &str) -> FieldResult {
    let pattern = Regex::new(r"^[0-9]{10,12}$").unwrap();

    if pattern.is_match(raw) {
        Ok(())
    } else {
        Err(FieldError::new("Please enter a valid phone number"))
    }
}

pub fn validate_guest_count(raw: &str) -> FieldResult {
    let Ok(count) = raw.trim().parse::<u8>() else {
        return Err(FieldError::new("Number of guests is required"));
    };

    if count < 1 {
        return Err(FieldError::new("At least 1 guest required"));
    }
    if count > 10 {
        return Err(FieldError::new("Maximum 10 guests allowed"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn accepts_major_scheme_card_numbers() {
        for number in [
            "4111111111111111",    // 16-digit Visa-style
            "4222222222222",       // 13-digit Visa-style
            "4111111111111111110", // 19-digit Visa-style
            "5555555555554444",    // Mastercard-style
            "378282246310005",     // Amex-style
            "30569309025904",      // Diners-style
            "6011111111111117",    // Discover-style
            "3530111333300000",    // JCB-style
        ] {
            assert_eq!(validate_card_number(number), Ok(()), "rejected {number}");
        }
    }

    #[test]
    fn card_number_tolerates_whitespace() {
        assert_eq!(validate_card_number("4111 1111 1111 1111"), Ok(()));
    }

    #[test]
    fn rejects_card_numbers_matching_no_scheme() {
        for number in ["1234567890123456", "411111111111111", "", "4111-1111-1111-1111"] {
            let result = validate_card_number(number);
            assert_eq!(
                result,
                Err(FieldError::new("Please enter a valid card number")),
                "accepted {number}"
            );
        }
    }

    #[test]
    fn expiry_shape_is_strict() {
        let today = date(2026, 8, 15);
        for raw in ["13/99", "0826", "08/2026", "8/26", "aa/bb", ""] {
            assert_eq!(
                validate_expiry_date(raw, today),
                Err(FieldError::new("Please enter a valid expiry date (MM/YY)")),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn expiry_compares_against_current_month() {
        let today = date(2026, 8, 15);
        assert_eq!(
            validate_expiry_date("07/26", today),
            Err(FieldError::new("Card has expired"))
        );
        assert_eq!(
            validate_expiry_date("12/25", today),
            Err(FieldError::new("Card has expired"))
        );
        assert_eq!(validate_expiry_date("08/26", today), Ok(()));
        assert_eq!(validate_expiry_date("09/26", today), Ok(()));
        assert_eq!(validate_expiry_date("01/30", today), Ok(()));
    }

    #[test]
    fn cvv_takes_three_or_four_digits() {
        assert!(validate_cvv("12").is_err());
        assert_eq!(validate_cvv("123"), Ok(()));
        assert_eq!(validate_cvv("1234"), Ok(()));
        assert!(validate_cvv("12345").is_err());
        assert!(validate_cvv("12a").is_err());
    }

    #[test]
    fn required_rejects_blank_input() {
        assert_eq!(
            validate_required("Country", "   "),
            Err(FieldError::new("Country is required"))
        );
        assert_eq!(validate_required("Country", "Chile"), Ok(()));
    }

    #[test]
    fn email_shape() {
        assert_eq!(validate_email("ana@example.com"), Ok(()));
        assert_eq!(validate_email("ANA@EXAMPLE.COM"), Ok(()));
        assert!(validate_email("ana@example").is_err());
        assert!(validate_email("a@b.c").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn phone_takes_ten_to_twelve_digits() {
        assert_eq!(validate_phone("0123456789"), Ok(()));
        assert_eq!(validate_phone("123456789012"), Ok(()));
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("1234567890123").is_err());
        assert!(validate_phone("555-123-4567").is_err());
    }

    #[test]
    fn guest_count_bounds() {
        assert_eq!(validate_guest_count("1"), Ok(()));
        assert_eq!(validate_guest_count("10"), Ok(()));
        assert_eq!(
            validate_guest_count("0"),
            Err(FieldError::new("At least 1 guest required"))
        );
        assert_eq!(
            validate_guest_count("11"),
            Err(FieldError::new("Maximum 10 guests allowed"))
        );
        assert_eq!(
            validate_guest_count(""),
            Err(FieldError::new("Number of guests is required"))
        );
    }
}
