use std::sync::Arc;

use crate::api::AuthApi;
use crate::error::AuthError;
use storage::repository::CredentialStore;
use vocab_core::model::UserProfile;

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Profile from the response, when the backend included one.
    pub user: Option<UserProfile>,
    pub message: Option<String>,
}

/// Login, registration, and logout against the auth boundary.
///
/// Persistence ordering is the contract here: credentials are written to
/// the store before a success result is returned, and a response without
/// a token persists nothing.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn CredentialStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn CredentialStore>) -> Self {
        Self { api, store }
    }

    /// Log in with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` without a network call when a
    /// field is blank, `AuthError::MissingToken` when the response carries
    /// no token, and transport/storage errors otherwise.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let payload = self.api.login(username, password).await?;

        let Some(token) = payload.token else {
            return Err(AuthError::MissingToken);
        };

        self.store.set_token(&token).await?;
        if let Some(user) = &payload.user {
            self.store.set_user(user).await?;
        }

        Ok(LoginOutcome {
            user: payload.user,
            message: payload.message,
        })
    }

    /// Register a new account.
    ///
    /// Field validation (all fields present, password equal to its
    /// confirmation) happens locally before any request is sent. A
    /// successful response must carry both token and profile; both are
    /// persisted before the profile is returned.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` for validation, transport, incomplete-response,
    /// and storage failures.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserProfile, AuthError> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let payload = self.api.register(username, email, password).await?;

        let (Some(token), Some(user)) = (payload.token, payload.user) else {
            return Err(AuthError::IncompleteRegistration);
        };

        self.store.set_token(&token).await?;
        self.store.set_user(&user).await?;

        Ok(user)
    }

    /// Log out: best-effort server call, then unconditional local clear.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the local clear fails. A failing
    /// logout request is logged and ignored.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Err(err) = self.api.logout().await {
            tracing::warn!(error = %err, "logout request failed");
        }
        self.store.clear().await?;
        Ok(())
    }
}
