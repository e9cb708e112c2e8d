//! Session and identity holder.
//!
//! Holds the logged-in user (or none) and the bearer token, both mirrored to
//! the persistent store under `current_user` and `auth_token`. A failed
//! login or registration leaves the current identity untouched.

use std::sync::{Arc, PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use shopfront_core::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, User};

use crate::api::{ApiClient, ApiError};
use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::storage::{KeyValueStore, StorageError, keys, read_json, write_json};
use crate::validation::{ValidationError, validate_login, validate_registration};

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The form was rejected locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The backend refused the credentials, or could not be reached.
    #[error("{message}")]
    LoginFailed {
        message: String,
        #[source]
        source: ApiError,
    },

    /// The backend refused the registration, or could not be reached.
    #[error("{message}")]
    RegistrationFailed {
        message: String,
        #[source]
        source: ApiError,
    },

    /// Profile update was refused.
    #[error("Profile update failed: {0}")]
    Profile(#[source] ApiError),

    /// The operation requires a logged-in user.
    #[error("Not logged in")]
    NotLoggedIn,
}

impl SessionError {
    /// The message to show a user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Profile(err) => err.user_message(),
            _ => self.to_string(),
        }
    }
}

/// The backend's `message` field when it sent one, `fallback` otherwise.
fn failure_message(err: &ApiError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}

/// Observable identity backed by a [`KeyValueStore`].
pub struct SessionStore {
    api: ApiClient,
    store: Arc<dyn KeyValueStore>,
    user: watch::Sender<Option<User>>,
    token: RwLock<Option<SecretString>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user.borrow().as_ref().map(|u| u.username.clone()))
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Restore the persisted identity and prime `api` with its token.
    ///
    /// Unreadable entries are treated as absent.
    #[must_use]
    pub fn load(api: ApiClient, store: Arc<dyn KeyValueStore>) -> Self {
        let user = read_json::<User>(store.as_ref(), keys::CURRENT_USER).unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable persisted user");
            None
        });
        let token = store
            .get(keys::AUTH_TOKEN)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable persisted token");
                None
            })
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);

        match &token {
            Some(token) => api.set_token(SecretString::from(token.expose_secret())),
            None => api.clear_token(),
        }
        if let Some(user) = &user {
            debug!(username = %user.username, "Session restored");
            set_sentry_user(&user.user_id, Some(&user.username), Some(&user.email));
        }

        let (user, _) = watch::channel(user);
        Self {
            api,
            store,
            user,
            token: RwLock::new(token),
        }
    }

    /// Observe the current user.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    /// Whether a token is held.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The held bearer token.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|token| SecretString::from(token.expose_secret()))
    }

    /// Whether the logged-in user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.borrow().as_ref().is_some_and(User::is_admin)
    }

    /// Log in and adopt the returned identity.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Invalid` if the form fails validation, or
    /// `SessionError::LoginFailed` with the server's message (else
    /// "Login failed"). The current identity is unchanged on error.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, SessionError> {
        validate_login(&credentials.username, &credentials.password).into_result()?;

        let response = self
            .api
            .login(credentials)
            .await
            .map_err(|source| SessionError::LoginFailed {
                message: failure_message(&source, "Login failed"),
                source,
            })?;

        info!(username = %response.user.username, "Logged in");
        Ok(self.adopt(response))
    }

    /// Create an account and adopt the returned identity.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Invalid` if the form fails validation, or
    /// `SessionError::RegistrationFailed` with the server's message (else
    /// "Registration failed"). The current identity is unchanged on error.
    #[instrument(skip(self, data, confirm_password), fields(username = %data.username))]
    pub async fn register(
        &self,
        data: &RegisterRequest,
        confirm_password: &str,
    ) -> Result<User, SessionError> {
        validate_registration(data, confirm_password).into_result()?;

        let response = self
            .api
            .register(data)
            .await
            .map_err(|source| SessionError::RegistrationFailed {
                message: failure_message(&source, "Registration failed"),
                source,
            })?;

        info!(username = %response.user.username, "Registered");
        Ok(self.adopt(response))
    }

    /// Forget the identity locally. There is no server call.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        for key in [keys::AUTH_TOKEN, keys::CURRENT_USER] {
            if let Err(e) = self.store.remove(key) {
                persist_failed(&e);
            }
        }
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.api.clear_token();
        self.user.send_replace(None);
        clear_sentry_user();
        info!("Logged out");
    }

    /// Update profile fields and republish the returned user.
    ///
    /// An empty update returns the current user without a server call.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotLoggedIn` without a session, or
    /// `SessionError::Profile` if the backend rejects the update.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, SessionError> {
        let current = self.current_user().ok_or(SessionError::NotLoggedIn)?;
        if !self.is_logged_in() {
            return Err(SessionError::NotLoggedIn);
        }
        if update.is_empty() {
            return Ok(current);
        }

        let user = self
            .api
            .update_profile(update)
            .await
            .map_err(SessionError::Profile)?;

        if let Err(e) = write_json(self.store.as_ref(), keys::CURRENT_USER, &user) {
            persist_failed(&e);
        }
        self.user.send_replace(Some(user.clone()));
        Ok(user)
    }

    fn adopt(&self, response: AuthResponse) -> User {
        let AuthResponse { token, user } = response;

        if let Err(e) = self.store.set(keys::AUTH_TOKEN, &token) {
            persist_failed(&e);
        }
        if let Err(e) = write_json(self.store.as_ref(), keys::CURRENT_USER, &user) {
            persist_failed(&e);
        }

        self.api.set_token(SecretString::from(token.as_str()));
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(SecretString::from(token));
        set_sentry_user(&user.user_id, Some(&user.username), Some(&user.email));
        self.user.send_replace(Some(user.clone()));
        user
    }
}

fn persist_failed(error: &StorageError) {
    warn!(error = %error, "Failed to persist session");
    add_breadcrumb(
        "session",
        "Failed to persist session",
        Some(&[("error", error.to_string().as_str())]),
    );
}
