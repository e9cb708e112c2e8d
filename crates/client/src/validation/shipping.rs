//! Shipping address form.

use shopfront_core::ShippingAddress;

use super::{FieldErrors, FieldResult, rules};

/// # Errors
///
/// Returns the field message if the first name is missing or too short.
pub fn validate_first_name(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("First name is required")
    } else if value.chars().count() < 2 {
        Err("First name must be at least 2 characters")
    } else {
        Ok(())
    }
}

/// # Errors
///
/// Returns the field message if the last name is missing or too short.
pub fn validate_last_name(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("Last name is required")
    } else if value.chars().count() < 2 {
        Err("Last name must be at least 2 characters")
    } else {
        Ok(())
    }
}

/// # Errors
///
/// Returns the field message if the email is missing or malformed.
pub fn validate_email(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("Email is required")
    } else if !rules::EMAIL.is_match(value) {
        Err("Please enter a valid email address")
    } else {
        Ok(())
    }
}

/// # Errors
///
/// Returns the field message if the street address is missing or too short.
pub fn validate_street_address(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("Street address is required")
    } else if value.chars().count() < 5 {
        Err("Please enter a valid street address")
    } else {
        Ok(())
    }
}

/// # Errors
///
/// Returns the field message if the city is missing or too short.
pub fn validate_city(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("City is required")
    } else if value.chars().count() < 2 {
        Err("Please enter a valid city name")
    } else {
        Ok(())
    }
}

/// # Errors
///
/// Returns the field message if the state is missing or too short.
pub fn validate_state(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("State is required")
    } else if value.chars().count() < 2 {
        Err("Please enter a valid state")
    } else {
        Ok(())
    }
}

/// # Errors
///
/// Returns the field message unless the ZIP code is 5 or 6 digits.
pub fn validate_zip_code(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("ZIP code is required")
    } else if !rules::ZIP_CODE.is_match(value) {
        Err("Please enter a valid 5-6 digit ZIP code")
    } else {
        Ok(())
    }
}

/// Check every field of the checkout address form.
#[must_use]
pub fn validate_shipping(address: &ShippingAddress) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check("firstName", validate_first_name(&address.first_name));
    errors.check("lastName", validate_last_name(&address.last_name));
    errors.check("email", validate_email(&address.email));
    errors.check("address", validate_street_address(&address.address));
    errors.check("city", validate_city(&address.city));
    errors.check("state", validate_state(&address.state));
    errors.check("zipCode", validate_zip_code(&address.zip_code));
    errors
}
