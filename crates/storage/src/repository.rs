use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use vocab_core::model::UserProfile;

/// Errors surfaced by credential storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistent store for the auth token and the cached user profile.
///
/// Absence is never an error: missing or unreadable entries come back as
/// `None`. A malformed cached profile is purged on read rather than
/// surfaced to the caller.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist the auth token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the token cannot be written.
    async fn set_token(&self, token: &str) -> Result<(), StorageError>;

    /// Fetch the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for backend failures, never for absence.
    async fn token(&self) -> Result<Option<String>, StorageError>;

    /// Persist the user profile alongside the token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be serialized or written.
    async fn set_user(&self, user: &UserProfile) -> Result<(), StorageError>;

    /// Fetch the cached profile. Malformed data is treated as absent and
    /// removed from the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for backend failures.
    async fn user(&self) -> Result<Option<UserProfile>, StorageError>;

    /// Remove token and profile together, unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the removal cannot be performed.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Simple in-memory credential store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    entries: Arc<Mutex<HashMap<&'static str, String>>>,
}

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "user_profile";

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<&'static str, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// Inject a raw profile blob; lets tests exercise the malformed-data path.
    pub fn set_raw_user(&self, raw: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(USER_KEY, raw.to_string());
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.lock()?.insert(TOKEN_KEY, token.to_string());
        Ok(())
    }

    async fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(TOKEN_KEY).cloned())
    }

    async fn set_user(&self, user: &UserProfile) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(user).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.lock()?.insert(USER_KEY, json);
        Ok(())
    }

    async fn user(&self) -> Result<Option<UserProfile>, StorageError> {
        let mut guard = self.lock()?;
        let Some(raw) = guard.get(USER_KEY).cloned() else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(_) => {
                // Unreadable cache entries are purged, not reported.
                guard.remove(USER_KEY);
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.remove(TOKEN_KEY);
        guard.remove(USER_KEY);
        Ok(())
    }
}
