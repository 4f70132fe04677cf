use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{CredentialStore, StorageError};
use vocab_core::model::UserProfile;

use super::SqliteStore;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "user_profile";

impl SqliteStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO credentials (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM credentials WHERE key = ?1")
            .bind(key)
            .fetch_optional(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(value))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM credentials WHERE key = ?1")
            .bind(key)
            .execute(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.put(TOKEN_KEY, token).await
    }

    async fn token(&self) -> Result<Option<String>, StorageError> {
        self.get(TOKEN_KEY).await
    }

    async fn set_user(&self, user: &UserProfile) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(user).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.put(USER_KEY, &json).await
    }

    async fn user(&self) -> Result<Option<UserProfile>, StorageError> {
        let Some(raw) = self.get(USER_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(_) => {
                // A cache entry we cannot parse is treated as absent.
                self.delete(USER_KEY).await?;
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        // Token and profile are removed in the same transaction.
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        sqlx::query("DELETE FROM credentials WHERE key IN (?1, ?2)")
            .bind(TOKEN_KEY)
            .bind(USER_KEY)
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        tx.commit()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
