//! Backend REST surface: typed traits, the reqwest client, and the
//! normalization layer that turns loose backend shapes into domain types.

mod client;
mod dto;
mod normalize;

pub use client::{ApiClient, ApiConfig};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::quiz::QuizSubmission;
use vocab_core::model::{LeaderboardEntry, Question, Topic, TopicId, UserProfile, VocabularyWord};

/// Normalized body of a login/register response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub message: Option<String>,
}

/// Normalized body of a session-check (`/me`) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCheck {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
}

/// Auth-boundary endpoints. These calls never trigger the forced-logout
/// hook even when they fail with 401/403.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /api/auth/login`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or HTTP failures.
    async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, ApiError>;

    /// `POST /api/auth/register`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or HTTP failures.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload, ApiError>;

    /// `GET /api/auth/me` with the stored bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or HTTP failures.
    async fn me(&self) -> Result<SessionCheck, ApiError>;

    /// `POST /api/auth/logout`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or HTTP failures.
    async fn logout(&self) -> Result<(), ApiError>;
}

/// Protected learning endpoints.
#[async_trait]
pub trait LearningApi: Send + Sync {
    /// `GET /api/learning/topics`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or HTTP failures.
    async fn topics(&self) -> Result<Vec<Topic>, ApiError>;

    /// `GET /api/learning/topics/{id}/vocabularies`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or HTTP failures.
    async fn vocabulary(&self, topic: TopicId) -> Result<Vec<VocabularyWord>, ApiError>;

    /// `GET /api/learning/topics/{id}/tests`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or HTTP failures.
    async fn questions(&self, topic: TopicId) -> Result<Vec<Question>, ApiError>;

    /// `GET /api/learning/leaderboard` or `/topics/{id}/leaderboard`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or HTTP failures.
    async fn leaderboard(&self, topic: Option<TopicId>)
    -> Result<Vec<LeaderboardEntry>, ApiError>;

    /// `POST /api/learning/topics/{id}/tests` with answers and completion time.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or HTTP failures.
    async fn submit_result(
        &self,
        topic: TopicId,
        submission: &QuizSubmission,
    ) -> Result<(), ApiError>;
}
