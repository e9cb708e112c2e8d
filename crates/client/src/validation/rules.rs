//! Shared patterns.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Static pattern, covered by tests
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static validation pattern must compile")
}

pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"));

pub static ZIP_CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{5,6}$"));

pub static USERNAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-zA-Z0-9_]+$"));

pub static PHONE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{10}$"));

pub static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| compile(r"[A-Z]"));

pub static DIGIT: LazyLock<Regex> = LazyLock::new(|| compile(r"[0-9]"));

pub static SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#));

pub static DIGITS_ONLY: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d+$"));

pub static CVV: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d{3,4}$"));

pub static EXPIRY: LazyLock<Regex> = LazyLock::new(|| compile(r"^(\d{2})/(\d{2})$"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        for pattern in [
            &EMAIL,
            &ZIP_CODE,
            &USERNAME,
            &PHONE,
            &UPPERCASE,
            &DIGIT,
            &SYMBOL,
            &DIGITS_ONLY,
            &CVV,
            &EXPIRY,
        ] {
            assert!(!pattern.as_str().is_empty());
        }
    }

    #[test]
    fn test_symbol_class() {
        for symbol in ["!", "@", "#", "[", "]", "\\", "/", "?", "-"] {
            assert!(SYMBOL.is_match(symbol), "expected {symbol} to match");
        }
        assert!(!SYMBOL.is_match("abcXYZ123"));
    }
}
