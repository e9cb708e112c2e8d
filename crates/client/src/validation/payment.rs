//! Payment form.

use chrono::{Datelike, NaiveDate};
use shopfront_core::PaymentInfo;

use super::{FieldErrors, FieldResult, rules};

const MIN_CARD_DIGITS: usize = 13;
const MAX_CARD_DIGITS: usize = 19;

/// Luhn (mod 10) checksum over a string of ASCII digits.
///
/// Returns `false` if `digits` contains anything but digits or is empty.
#[must_use]
pub fn luhn_checksum_valid(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }
    let mut sum = 0;
    for (position, c) in digits.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

/// Card numbers may be typed with spaces; they are stripped before checking.
///
/// # Errors
///
/// Returns the field message describing the first rule broken.
pub fn validate_card_number(value: &str) -> FieldResult {
    let digits: String = value.split_whitespace().collect();
    if digits.len() < MIN_CARD_DIGITS {
        return Err("Please enter a card number (minimum 13 digits)");
    }
    if !rules::DIGITS_ONLY.is_match(&digits) {
        return Err("Card number must contain only numbers");
    }
    if digits.len() > MAX_CARD_DIGITS {
        return Err("Card number must be at most 19 digits");
    }
    if !luhn_checksum_valid(&digits) {
        return Err("Card number is not valid");
    }
    Ok(())
}

/// # Errors
///
/// Returns the field message if the trimmed name is shorter than 2 characters.
pub fn validate_card_holder_name(value: &str) -> FieldResult {
    if value.trim().chars().count() < 2 {
        Err("Please enter the cardholder name")
    } else {
        Ok(())
    }
}

/// `MM/YY` expiry, valid through the end of its month.
///
/// # Errors
///
/// Returns the field message for a malformed, out-of-range or past date.
pub fn validate_expiry_date(value: &str, today: NaiveDate) -> FieldResult {
    let captures = rules::EXPIRY
        .captures(value.trim())
        .ok_or("Please enter expiry date (MM/YY)")?;
    let (Some(month), Some(year)) = (captures.get(1), captures.get(2)) else {
        return Err("Please enter expiry date (MM/YY)");
    };
    let month: u32 = month
        .as_str()
        .parse()
        .map_err(|_| "Please enter expiry date (MM/YY)")?;
    let year: i32 = year
        .as_str()
        .parse()
        .map_err(|_| "Please enter expiry date (MM/YY)")?;

    if !(1..=12).contains(&month) {
        return Err("Please enter a valid expiry month (01-12)");
    }
    if (2000 + year, month) < (today.year(), today.month()) {
        return Err("Card has expired");
    }
    Ok(())
}

/// # Errors
///
/// Returns the field message unless the CVV is 3 or 4 digits.
pub fn validate_cvv(value: &str) -> FieldResult {
    if rules::CVV.is_match(value) {
        Ok(())
    } else {
        Err("Please enter a valid CVV (3-4 digits)")
    }
}

/// Check every field of the payment form against `today`.
#[must_use]
pub fn validate_payment(payment: &PaymentInfo, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check("cardNumber", validate_card_number(&payment.card_number));
    errors.check(
        "cardHolderName",
        validate_card_holder_name(&payment.card_holder_name),
    );
    errors.check("expiryDate", validate_expiry_date(&payment.expiry_date, today));
    errors.check("cvv", validate_cvv(&payment.cvv));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_luhn() {
        assert!(luhn_checksum_valid("4111111111111111"));
        assert!(luhn_checksum_valid("5555555555554444"));
        assert!(luhn_checksum_valid("378282246310005"));
        assert!(!luhn_checksum_valid("4111111111111112"));
        assert!(!luhn_checksum_valid("41111a1111111111"));
        assert!(!luhn_checksum_valid(""));
    }

    #[test]
    fn test_card_number_accepts_spaced_test_card() {
        assert_eq!(validate_card_number("4111111111111111"), Ok(()));
        assert_eq!(validate_card_number("4111 1111 1111 1111"), Ok(()));
    }

    #[test]
    fn test_card_number_rejections() {
        assert_eq!(
            validate_card_number("4111 1111"),
            Err("Please enter a card number (minimum 13 digits)")
        );
        assert_eq!(
            validate_card_number("4111-1111-1111-1111"),
            Err("Card number must contain only numbers")
        );
        assert_eq!(
            validate_card_number("41111111111111111111"),
            Err("Card number must be at most 19 digits")
        );
        assert_eq!(
            validate_card_number("4111111111111112"),
            Err("Card number is not valid")
        );
    }

    #[test]
    fn test_expiry_date() {
        assert_eq!(validate_expiry_date("12/30", today()), Ok(()));
        // The current month is still valid
        assert_eq!(validate_expiry_date("06/25", today()), Ok(()));
        assert_eq!(validate_expiry_date("05/25", today()), Err("Card has expired"));
        assert_eq!(validate_expiry_date("01/20", today()), Err("Card has expired"));
        assert_eq!(
            validate_expiry_date("13/30", today()),
            Err("Please enter a valid expiry month (01-12)")
        );
        assert_eq!(
            validate_expiry_date("00/30", today()),
            Err("Please enter a valid expiry month (01-12)")
        );
        assert_eq!(
            validate_expiry_date("1230", today()),
            Err("Please enter expiry date (MM/YY)")
        );
        assert_eq!(
            validate_expiry_date("", today()),
            Err("Please enter expiry date (MM/YY)")
        );
    }

    #[test]
    fn test_cvv() {
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("1234").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("12345").is_err());
        assert!(validate_cvv("12a").is_err());
    }

    #[test]
    fn test_validate_payment_form() {
        let good = PaymentInfo {
            card_number: "4111 1111 1111 1111".to_string(),
            card_holder_name: "Jane Smith".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
        };
        assert!(validate_payment(&good, today()).is_empty());

        let errors = validate_payment(&PaymentInfo::default(), today());
        assert_eq!(errors.iter().count(), 4);
        assert_eq!(
            errors.get("cardHolderName"),
            Some("Please enter the cardholder name")
        );
    }
}
