//! Unified error handling with Sentry integration.
//!
//! Every concern has its own error enum; `ClientError` gathers them for
//! callers that drive whole flows, such as the CLI. Unexpected failures are
//! captured to Sentry by [`ClientError::report`] before being shown.

use thiserror::Error;

use crate::api::ApiError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::orders::OrderError;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::validation::{FieldErrors, ValidationError};

/// Client-level error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A form did not pass validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Login, registration or profile update failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Checkout could not be completed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Order action was refused or failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The action needs a logged-in user.
    #[error("Please log in first")]
    NotLoggedIn,
}

impl ClientError {
    /// The message to show a user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Session(err) => err.user_message(),
            Self::Checkout(err) => err.user_message(),
            Self::Order(err) => err.user_message(),
            Self::Config(_) | Self::Storage(_) | Self::Validation(_) | Self::NotLoggedIn => {
                self.to_string()
            }
        }
    }

    /// Per-field messages, when a form failed validation.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(err)
            | Self::Session(SessionError::Invalid(err))
            | Self::Checkout(CheckoutError::Invalid(err)) => Some(err.errors()),
            _ => None,
        }
    }

    /// Whether this failure is unexpected and worth an error report.
    ///
    /// Backend rejections and invalid input are part of normal operation.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        match self {
            Self::Api(err) => !err.is_server_response(),
            Self::Storage(_) | Self::Config(_) => true,
            Self::Checkout(CheckoutError::Storage(_)) => true,
            Self::Validation(_)
            | Self::Session(_)
            | Self::Checkout(_)
            | Self::Order(_)
            | Self::NotLoggedIn => false,
        }
    }

    /// Capture unexpected failures to Sentry and log them.
    pub fn report(&self) {
        if self.is_unexpected() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Client error"
            );
        } else {
            tracing::debug!(error = %self, "Client error");
        }
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Set the Sentry user context.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, username: Option<&str>, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: username.map(String::from),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
