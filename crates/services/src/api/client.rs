use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::quiz::QuizSubmission;
use crate::session::SessionController;
use storage::repository::CredentialStore;
use vocab_core::model::{LeaderboardEntry, Question, Topic, TopicId, VocabularyWord};

use super::dto::{
    LeaderboardResponse, LoginBody, QuestionsResponse, RawAuthResponse, RegisterBody, SubmitBody,
    TopicsResponse, WordsResponse,
};
use super::{AuthApi, AuthPayload, LearningApi, SessionCheck, normalize};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Connection settings for the backend.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Reads `VOCAB_API_BASE_URL`, falling back to the local dev server.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("VOCAB_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Whether a request belongs to the auth boundary.
///
/// Auth-boundary requests (login, register, session check) are allowed to
/// fail with 401/403 without tearing the session down; everything else
/// routes such failures through the session controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Boundary {
    Auth,
    Protected,
}

/// The single configured request pipeline.
///
/// Every outgoing request picks up the stored bearer token; every 401/403
/// on a protected endpoint clears the session and schedules one redirect.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    controller: Arc<SessionController>,
}

impl ApiClient {
    #[must_use]
    pub fn new(
        config: &ApiConfig,
        store: Arc<dyn CredentialStore>,
        controller: Arc<SessionController>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            controller,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        boundary: Boundary,
    ) -> Result<T, ApiError> {
        let request = match self.store.token().await {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(err) => {
                tracing::debug!(error = %err, "token lookup failed, sending unauthenticated");
                request
            }
        };

        let response = request.send().await?;
        let status = response.status();

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
            && boundary == Boundary::Protected
        {
            self.controller.handle_auth_failure().await;
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        // Some ack endpoints answer 2xx with an empty body.
        let body = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, boundary: Boundary) -> Result<T, ApiError> {
        self.dispatch(self.http.get(self.url(path)), boundary).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        boundary: Boundary,
    ) -> Result<T, ApiError> {
        self.dispatch(self.http.post(self.url(path)).json(body), boundary)
            .await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let body = LoginBody { username, password };
        let raw: RawAuthResponse = self
            .post("/api/auth/login", &body, Boundary::Auth)
            .await?;
        Ok(normalize::auth_payload(raw))
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload, ApiError> {
        let body = RegisterBody {
            username,
            email,
            password,
        };
        let raw: RawAuthResponse = self
            .post("/api/auth/register", &body, Boundary::Auth)
            .await?;
        Ok(normalize::auth_payload(raw))
    }

    async fn me(&self) -> Result<SessionCheck, ApiError> {
        let raw: RawAuthResponse = self.get("/api/auth/me", Boundary::Auth).await?;
        Ok(normalize::session_check(raw))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let _ack: serde_json::Value = self
            .post("/api/auth/logout", &serde_json::json!({}), Boundary::Protected)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl LearningApi for ApiClient {
    async fn topics(&self) -> Result<Vec<Topic>, ApiError> {
        let raw: TopicsResponse = self.get("/api/learning/topics", Boundary::Protected).await?;
        Ok(normalize::topics(raw))
    }

    async fn vocabulary(&self, topic: TopicId) -> Result<Vec<VocabularyWord>, ApiError> {
        let path = format!("/api/learning/topics/{topic}/vocabularies");
        let raw: WordsResponse = self.get(&path, Boundary::Protected).await?;
        Ok(normalize::words(raw, topic))
    }

    async fn questions(&self, topic: TopicId) -> Result<Vec<Question>, ApiError> {
        let path = format!("/api/learning/topics/{topic}/tests");
        let raw: QuestionsResponse = self.get(&path, Boundary::Protected).await?;
        Ok(normalize::questions(raw))
    }

    async fn leaderboard(
        &self,
        topic: Option<TopicId>,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let path = match topic {
            Some(id) => format!("/api/learning/topics/{id}/leaderboard"),
            None => "/api/learning/leaderboard".to_string(),
        };
        let raw: LeaderboardResponse = self.get(&path, Boundary::Protected).await?;
        Ok(normalize::leaderboard(raw))
    }

    async fn submit_result(
        &self,
        topic: TopicId,
        submission: &QuizSubmission,
    ) -> Result<(), ApiError> {
        let body = SubmitBody {
            answers: submission
                .answers
                .iter()
                .map(|(id, selected)| (id.to_string(), selected.clone()))
                .collect(),
            completion_time: submission.completion_time,
        };
        let path = format!("/api/learning/topics/{topic}/tests");
        let _ack: serde_json::Value = self.post(&path, &body, Boundary::Protected).await?;
        Ok(())
    }
}
