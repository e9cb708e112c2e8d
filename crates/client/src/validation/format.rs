//! As-you-type input formatting for the payment form.
//!
//! Interactive front-ends run each keystroke through these. The CLI
//! normalizes the expiry and CVV arguments with them before validation.

const CARD_DIGITS: usize = 16;
const CVV_DIGITS: usize = 4;

fn digits(value: &str, limit: usize) -> String {
    value
        .chars()
        .filter(char::is_ascii_digit)
        .take(limit)
        .collect()
}

/// Keep the first 16 digits and group them in fours: `4111 1111 1111 1111`.
#[must_use]
pub fn format_card_number(value: &str) -> String {
    let digits = digits(value, CARD_DIGITS);
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(c);
    }
    formatted
}

/// Insert the `/` after the month: `1230` becomes `12/30`.
#[must_use]
pub fn format_expiry_date(value: &str) -> String {
    let digits = digits(value, 4);
    if digits.len() > 2 {
        let (month, year) = digits.split_at(2);
        format!("{month}/{year}")
    } else {
        digits
    }
}

/// Digits only, at most four.
#[must_use]
pub fn format_cvv(value: &str) -> String {
    digits(value, CVV_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-1111-11"), "4111 1111 11");
        assert_eq!(format_card_number("41111111111111112222"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("abcd"), "");
    }

    #[test]
    fn test_format_expiry_date() {
        assert_eq!(format_expiry_date("1"), "1");
        assert_eq!(format_expiry_date("12"), "12");
        assert_eq!(format_expiry_date("123"), "12/3");
        assert_eq!(format_expiry_date("12/30"), "12/30");
        assert_eq!(format_expiry_date("123099"), "12/30");
    }

    #[test]
    fn test_format_cvv() {
        assert_eq!(format_cvv("12a3"), "123");
        assert_eq!(format_cvv("123456"), "1234");
    }
}
