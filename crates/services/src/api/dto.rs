//! Raw serde shapes for backend responses.
//!
//! The backend is loose about field naming and wrapping: ids arrive as
//! numbers or strings, lists arrive bare or inside an envelope, and quiz
//! rows spell the answer field two ways. Everything here is permissive;
//! `normalize` decides what survives.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An id that may arrive as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            RawId::Number(n) => Some(*n),
            RawId::Text(s) => s.parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub id: Option<RawId>,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Shared shape of login, register, and session-check responses.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthResponse {
    pub token: Option<String>,
    pub user: Option<RawUser>,
    pub message: Option<String>,
    pub authenticated: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTopic {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub total_vocabularies: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TopicsResponse {
    List(Vec<RawTopic>),
    Wrapped { topics: Vec<RawTopic> },
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWord {
    pub id: Option<RawId>,
    pub word: Option<String>,
    pub meaning: Option<String>,
    pub phonetic: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WordsResponse {
    List(Vec<RawWord>),
    Wrapped { data: Vec<RawWord> },
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub id: Option<RawId>,
    pub question: Option<String>,
    #[serde(alias = "correctAnswer")]
    pub correct_answer: Option<String>,
    pub options: Option<Vec<String>>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuestionsResponse {
    List(Vec<RawQuestion>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLeaderboardEntry {
    #[serde(alias = "userId")]
    pub user_id: Option<RawId>,
    pub username: Option<String>,
    pub topic_id: Option<RawId>,
    pub total_score: Option<u32>,
    pub tests_completed: Option<u32>,
    pub average_score: Option<f64>,
    pub rank: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LeaderboardResponse {
    List(Vec<RawLeaderboardEntry>),
    Wrapped {
        leaderboard: Vec<RawLeaderboardEntry>,
    },
    Other(serde_json::Value),
}

/// Wire body for test submission. Map keys are stringified question ids.
#[derive(Debug, Serialize)]
pub struct SubmitBody {
    pub answers: BTreeMap<String, String>,
    pub completion_time: u64,
}
