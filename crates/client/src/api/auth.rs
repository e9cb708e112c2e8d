//! `auth/*` endpoints.

use tracing::instrument;

use shopfront_core::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, User};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Exchange credentials for a token and profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for rejected credentials, or any
    /// transport/parse error.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint("auth/login")?;
        self.post(url, credentials).await
    }

    /// Create an account; the backend logs the new user in immediately.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection (e.g. duplicate username) or any
    /// transport/parse error.
    #[instrument(skip(self, data), fields(username = %data.username))]
    pub async fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint("auth/register")?;
        self.post(url, data).await
    }

    /// Update profile fields of the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without a valid token, or any
    /// transport/parse error.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let url = self.endpoint("auth/profile")?;
        self.put(url, update).await
    }
}
