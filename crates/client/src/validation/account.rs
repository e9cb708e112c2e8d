//! Login and registration forms.

use shopfront_core::RegisterRequest;

use super::shipping::{validate_email, validate_first_name, validate_last_name};
use super::{FieldErrors, FieldResult, rules};

/// # Errors
///
/// Returns the field message if the username is missing or too short.
pub fn validate_login_username(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("Username is required")
    } else if value.chars().count() < 3 {
        Err("Username must be at least 3 characters")
    } else {
        Ok(())
    }
}

/// # Errors
///
/// Returns the field message if the password is missing or too short.
pub fn validate_login_password(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("Password is required")
    } else if value.chars().count() < 6 {
        Err("Password must be at least 6 characters")
    } else {
        Ok(())
    }
}

/// Check the login form.
#[must_use]
pub fn validate_login(username: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check("username", validate_login_username(username));
    errors.check("password", validate_login_password(password));
    errors
}

/// Registration usernames: 3-50 characters of letters, digits and underscores.
///
/// # Errors
///
/// Returns the field message describing the first rule broken.
pub fn validate_username(value: &str) -> FieldResult {
    let length = value.chars().count();
    if value.is_empty() {
        Err("Username is required")
    } else if length < 3 {
        Err("Username must be at least 3 characters")
    } else if length > 50 {
        Err("Username must be less than 50 characters")
    } else if !rules::USERNAME.is_match(value) {
        Err("Username can only contain letters, numbers, and underscores")
    } else {
        Ok(())
    }
}

/// Registration passwords need 6+ characters with an uppercase letter, a
/// digit and a symbol.
///
/// # Errors
///
/// Returns the field message describing the first rule broken.
pub fn validate_password(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("Password is required")
    } else if value.chars().count() < 6 {
        Err("Password must be at least 6 characters")
    } else if !rules::UPPERCASE.is_match(value) {
        Err("Password must contain at least one uppercase letter")
    } else if !rules::DIGIT.is_match(value) {
        Err("Password must contain at least one number")
    } else if !rules::SYMBOL.is_match(value) {
        Err("Password must contain at least one symbol (!@#$%^&* etc.)")
    } else {
        Ok(())
    }
}

/// # Errors
///
/// Returns the field message if the confirmation is missing or differs.
pub fn validate_confirm_password(password: &str, confirmation: &str) -> FieldResult {
    if confirmation.is_empty() {
        Err("Please confirm your password")
    } else if confirmation != password {
        Err("Passwords do not match")
    } else {
        Ok(())
    }
}

/// Phone is optional; when given it must be 10 digits once dashes and
/// spaces are removed.
///
/// # Errors
///
/// Returns the field message for a malformed phone number.
pub fn validate_phone(value: &str) -> FieldResult {
    if value.is_empty() {
        return Ok(());
    }
    let stripped: String = value
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    if rules::PHONE.is_match(&stripped) {
        Ok(())
    } else {
        Err("Please enter a valid 10-digit phone number")
    }
}

/// Check the registration form.
#[must_use]
pub fn validate_registration(data: &RegisterRequest, confirm_password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check("firstName", validate_first_name(&data.first_name));
    errors.check("lastName", validate_last_name(&data.last_name));
    errors.check("username", validate_username(&data.username));
    errors.check("email", validate_email(&data.email));
    errors.check("password", validate_password(&data.password));
    errors.check(
        "confirmPassword",
        validate_confirm_password(&data.password, confirm_password),
    );
    errors.check("phone", validate_phone(&data.phone));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterRequest {
        RegisterRequest {
            username: "jane_smith".to_string(),
            password: "Secret1!".to_string(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            address: "456 Oak Ave".to_string(),
            phone: "987-654-3210".to_string(),
        }
    }

    #[test]
    fn test_login_form() {
        assert!(validate_login("john_doe", "password123").is_empty());
        let errors = validate_login("jo", "");
        assert_eq!(
            errors.get("username"),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&registration(), "Secret1!").is_empty());
    }

    #[test]
    fn test_password_rules_in_order() {
        assert_eq!(
            validate_password("Ab1!"),
            Err("Password must be at least 6 characters")
        );
        assert_eq!(
            validate_password("secret1!"),
            Err("Password must contain at least one uppercase letter")
        );
        assert_eq!(
            validate_password("Secret!!"),
            Err("Password must contain at least one number")
        );
        assert_eq!(
            validate_password("Secret12"),
            Err("Password must contain at least one symbol (!@#$%^&* etc.)")
        );
        assert_eq!(validate_password("Secret1_"), Ok(()));
    }

    #[test]
    fn test_confirmation_must_match() {
        let errors = validate_registration(&registration(), "Secret2!");
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
        let errors = validate_registration(&registration(), "");
        assert_eq!(
            errors.get("confirmPassword"),
            Some("Please confirm your password")
        );
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("user_01").is_ok());
        assert!(validate_username("has space").is_err());
        assert_eq!(
            validate_username(&"a".repeat(51)),
            Err("Username must be less than 50 characters")
        );
    }

    #[test]
    fn test_phone_is_optional_but_checked() {
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("123 456 7890").is_ok());
        assert!(validate_phone("123-456-7890").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("(123) 456-7890").is_err());
    }
}
