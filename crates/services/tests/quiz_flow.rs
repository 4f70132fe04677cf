//! End-to-end flow over the public services API with a fake backend:
//! log in, pass the gate, take a quiz, and submit once.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use services::api::{AuthApi, AuthPayload, LearningApi, SessionCheck};
use services::error::ApiError;
use services::quiz::QuizSubmission;
use services::{AuthGate, AuthService, CatalogService, GateState, Listing, QuizWorkflow};
use storage::repository::{CredentialStore, InMemoryCredentialStore};
use vocab_core::model::{
    LeaderboardEntry, Question, QuestionId, Topic, TopicId, UserId, UserProfile, VocabularyWord,
};
use vocab_core::time::fixed_clock;

struct FakeBackend {
    questions: Vec<Question>,
    submissions: AtomicUsize,
}

impl FakeBackend {
    fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            submissions: AtomicUsize::new(0),
        }
    }

    fn profile() -> UserProfile {
        UserProfile::new(UserId::new(1), "linh", "linh@example.com")
    }
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn login(&self, username: &str, _password: &str) -> Result<AuthPayload, ApiError> {
        if username == "linh" {
            Ok(AuthPayload {
                token: Some("jwt-linh".into()),
                user: Some(Self::profile()),
                message: None,
            })
        } else {
            Ok(AuthPayload {
                token: None,
                user: None,
                message: Some("invalid credentials".into()),
            })
        }
    }

    async fn register(&self, _: &str, _: &str, _: &str) -> Result<AuthPayload, ApiError> {
        Ok(AuthPayload {
            token: Some("jwt-new".into()),
            user: Some(Self::profile()),
            message: None,
        })
    }

    async fn me(&self) -> Result<SessionCheck, ApiError> {
        Ok(SessionCheck {
            authenticated: true,
            user: Some(Self::profile()),
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

#[async_trait]
impl LearningApi for FakeBackend {
    async fn topics(&self) -> Result<Vec<Topic>, ApiError> {
        Ok(vec![Topic::new(TopicId::new(1), "Animals", "Animal words", 12)])
    }

    async fn vocabulary(&self, topic: TopicId) -> Result<Vec<VocabularyWord>, ApiError> {
        let _ = topic;
        Ok(Vec::new())
    }

    async fn questions(&self, _: TopicId) -> Result<Vec<Question>, ApiError> {
        Ok(self.questions.clone())
    }

    async fn leaderboard(&self, _: Option<TopicId>) -> Result<Vec<LeaderboardEntry>, ApiError> {
        Ok(Vec::new())
    }

    async fn submit_result(&self, _: TopicId, _: &QuizSubmission) -> Result<(), ApiError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn build_question(id: u64) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("word-{id}"),
        format!("answer-{id}"),
        vec![format!("answer-{id}"), "wrong".to_string()],
    )
    .unwrap()
}

#[tokio::test]
async fn login_gate_quiz_and_single_submission() {
    let backend = Arc::new(FakeBackend::new((1..=12).map(build_question).collect()));
    let store = Arc::new(InMemoryCredentialStore::new());

    let auth = AuthService::new(backend.clone(), store.clone());
    auth.login("linh", "secret").await.unwrap();
    assert_eq!(store.token().await.unwrap().as_deref(), Some("jwt-linh"));

    let gate = AuthGate::new(backend.clone(), store.clone());
    let state = gate.resolve().await;
    assert!(state.is_authenticated());

    let workflow = QuizWorkflow::new(fixed_clock(), backend.clone());
    let mut session = workflow.start(TopicId::new(1)).await.unwrap();
    assert_eq!(session.total(), 5);

    while !session.is_complete() {
        let prompt = session.current_question().unwrap().prompt().to_string();
        let answer = prompt.replace("word", "answer");
        workflow.answer_current(&mut session, &answer).unwrap();
        workflow.advance(&mut session).await;
    }

    assert_eq!(session.score(), 5);
    assert_eq!(backend.submissions.load(Ordering::SeqCst), 1);

    let summary = session.summary().unwrap();
    assert_eq!(summary.score(), 5);
    assert_eq!(summary.total_questions(), 5);
}

#[tokio::test]
async fn failed_login_leaves_the_gate_closed() {
    let backend = Arc::new(FakeBackend::new(Vec::new()));
    let store = Arc::new(InMemoryCredentialStore::new());

    let auth = AuthService::new(backend.clone(), store.clone());
    assert!(auth.login("mallory", "guess").await.is_err());

    let gate = AuthGate::new(backend, store);
    assert_eq!(gate.resolve().await, GateState::Unauthenticated);
}

#[tokio::test]
async fn catalog_reads_work_after_login() {
    let backend = Arc::new(FakeBackend::new(Vec::new()));
    let store = Arc::new(InMemoryCredentialStore::new());

    AuthService::new(backend.clone(), store.clone())
        .login("linh", "secret")
        .await
        .unwrap();

    let catalog = CatalogService::new(backend);
    let topics = catalog.topics().await;
    assert_eq!(topics.items().len(), 1);

    let leaderboard = catalog.leaderboard(Some(TopicId::new(1))).await;
    assert_eq!(leaderboard, Listing::Empty);
}
