//! REST client for the storefront backend.
//!
//! # Architecture
//!
//! - One `reqwest` client shared by every endpoint group
//! - The backend is source of truth - the client holds no order or payment state
//! - Catalog lookups are cached in memory via `moka` (TTL from configuration)
//! - The bearer token is attached to every request once a session is held
//!
//! # Endpoint groups
//!
//! - `auth` - login, register, profile
//! - `products` - catalog listing, lookup, search
//! - `orders` - create, list, track, cancel, status updates
//! - `payments` - mock payment processing and refunds
//! - `admin` - dashboard statistics, order management, user listing
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::api::ApiClient;
//!
//! let client = ApiClient::new(&config)?;
//! let products = client.get_products().await?;
//! let order = client.get_order(order_id).await?;
//! ```

mod admin;
mod auth;
mod cache;
mod client;
mod orders;
mod payments;
mod products;

use std::fmt;

use thiserror::Error;

pub use client::ApiClient;

/// Text pulled out of an error response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    text: String,
    /// Set when `text` is the body's `message` field.
    from_message_field: bool,
}

impl ErrorMessage {
    /// A message the backend sent in its `message` field.
    #[must_use]
    pub fn server(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_message_field: true,
        }
    }

    /// Text recovered from some other part of the response.
    #[must_use]
    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_message_field: false,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The backend's own `message`, if the body carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.from_message_field.then_some(self.text.as_str())
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Errors that can occur when calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The backend rejected the credentials or token (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(ErrorMessage),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(ErrorMessage),

    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a truncated body.
        message: ErrorMessage,
    },
}

impl ApiError {
    /// The message to show a user for this failure.
    ///
    /// Server-provided messages are surfaced verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized(message) | Self::NotFound(message) | Self::Status { message, .. } => {
                message.to_string()
            }
            Self::Http(_) => "Unable to reach the server".to_string(),
            Self::Parse(_) => "Unexpected response from the server".to_string(),
            Self::Url(_) => "Invalid request".to_string(),
        }
    }

    /// The `message` field of the error body, when the backend sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(message) | Self::NotFound(message) | Self::Status { message, .. } => {
                message.server_message()
            }
            Self::Http(_) | Self::Parse(_) | Self::Url(_) => None,
        }
    }

    /// Whether the error came back from the server rather than the transport.
    #[must_use]
    pub const fn is_server_response(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::NotFound(_) | Self::Status { .. }
        )
    }
}

/// Pull the human-readable message out of an error body.
///
/// The backend answers errors with `{"message": "..."}`; anything else falls
/// back to an `error` field, then the first 200 characters of the body, then
/// the status reason.
pub(crate) fn extract_error_message(status: reqwest::StatusCode, body: &str) -> ErrorMessage {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(message)) = fields.get(key)
                && !message.trim().is_empty()
            {
                return if key == "message" {
                    ErrorMessage::server(message.clone())
                } else {
                    ErrorMessage::fallback(message.clone())
                };
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return ErrorMessage::fallback(status.canonical_reason().unwrap_or("Request failed"));
    }
    ErrorMessage::fallback(trimmed.chars().take(200).collect::<String>())
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound(ErrorMessage::server("Order not found with id: 9"));
        assert_eq!(err.to_string(), "Not found: Order not found with id: 9");

        let err = ApiError::Status {
            status: 400,
            message: ErrorMessage::server("Insufficient stock"),
        };
        assert_eq!(err.to_string(), "HTTP 400: Insufficient stock");
        assert_eq!(err.user_message(), "Insufficient stock");
        assert!(err.is_server_response());
    }

    #[test]
    fn test_extract_message_field() {
        let message = extract_error_message(
            StatusCode::UNAUTHORIZED,
            r#"{"status": 401, "message": "Invalid username or password"}"#,
        );
        assert_eq!(message.as_str(), "Invalid username or password");
        assert_eq!(
            message.server_message(),
            Some("Invalid username or password")
        );
    }

    #[test]
    fn test_extract_error_field() {
        let message =
            extract_error_message(StatusCode::BAD_REQUEST, r#"{"error": "Bad Request"}"#);
        assert_eq!(message.as_str(), "Bad Request");
        assert_eq!(message.server_message(), None);
    }

    #[test]
    fn test_extract_falls_back_to_body_then_reason() {
        let message = extract_error_message(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(message.as_str(), "upstream down");
        assert_eq!(message.server_message(), None);

        let message = extract_error_message(StatusCode::SERVICE_UNAVAILABLE, "  ");
        assert_eq!(message.as_str(), "Service Unavailable");

        let long = "x".repeat(500);
        assert_eq!(
            extract_error_message(StatusCode::INTERNAL_SERVER_ERROR, &long)
                .as_str()
                .len(),
            200
        );
    }
}
