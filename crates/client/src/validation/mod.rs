//! Advisory form validation.
//!
//! Validators mirror what the storefront forms check before submitting.
//! They block submission locally but are never a security boundary: the
//! backend re-validates everything.
//!
//! Each field check returns `Result<(), &'static str>` with the message to
//! show next to the field; form-level validators collect them into
//! [`FieldErrors`].

mod account;
mod format;
mod payment;
mod rules;
mod shipping;

pub use account::{
    validate_confirm_password, validate_login, validate_login_password, validate_login_username,
    validate_password, validate_phone, validate_registration, validate_username,
};
pub use format::{format_card_number, format_cvv, format_expiry_date};
pub use payment::{
    luhn_checksum_valid, validate_card_holder_name, validate_card_number, validate_cvv,
    validate_expiry_date, validate_payment,
};
pub use shipping::{
    validate_city, validate_email, validate_first_name, validate_last_name, validate_shipping,
    validate_state, validate_street_address, validate_zip_code,
};

use core::fmt;

use thiserror::Error;

/// Outcome of a single field check.
pub type FieldResult = Result<(), &'static str>;

/// A failed field and its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name, as the backend spells it (`firstName`, `zipCode`, ...).
    pub field: &'static str,
    pub message: &'static str,
}

/// Field errors of one form, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// An empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record the outcome of checking `field`.
    pub fn check(&mut self, field: &'static str, result: FieldResult) {
        if let Err(message) = result {
            self.errors.push(FieldError { field, message });
        }
    }

    /// Whether every checked field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message recorded for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    /// The first failure, in form order.
    #[must_use]
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    /// Iterate over failures in form order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing failed, otherwise a [`ValidationError`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` carrying these errors if any field failed.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// A form was rejected before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {0}")]
pub struct ValidationError(pub FieldErrors);

impl ValidationError {
    /// The individual field errors.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_keep_form_order() {
        let mut errors = FieldErrors::new();
        errors.check("firstName", Err("First name is required"));
        errors.check("lastName", Ok(()));
        errors.check("zipCode", Err("ZIP code is required"));

        assert_eq!(errors.get("zipCode"), Some("ZIP code is required"));
        assert_eq!(errors.get("lastName"), None);
        assert_eq!(errors.first().map(|e| e.field), Some("firstName"));
        assert_eq!(
            errors.to_string(),
            "firstName: First name is required; zipCode: ZIP code is required"
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
