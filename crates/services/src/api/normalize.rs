//! One explicit normalization function per response shape.
//!
//! Rows that cannot be made valid are skipped rather than failing the
//! whole response; an unrecognizable envelope normalizes to empty.

use vocab_core::model::{
    LeaderboardEntry, Question, QuestionId, Topic, TopicId, UserId, UserProfile, VocabularyWord,
    WordId,
};

use super::dto::{
    LeaderboardResponse, QuestionsResponse, RawAuthResponse, RawLeaderboardEntry, RawQuestion,
    RawTopic, RawUser, RawWord, TopicsResponse, WordsResponse,
};
use super::{AuthPayload, SessionCheck};

pub fn user(raw: RawUser) -> Option<UserProfile> {
    let id = raw.id.as_ref().and_then(super::dto::RawId::as_u64)?;
    Some(UserProfile::new(
        UserId::new(id),
        raw.username.unwrap_or_default(),
        raw.email.unwrap_or_default(),
    ))
}

pub fn auth_payload(raw: RawAuthResponse) -> AuthPayload {
    AuthPayload {
        token: raw.token.filter(|t| !t.is_empty()),
        user: raw.user.and_then(user),
        message: raw.message,
    }
}

pub fn session_check(raw: RawAuthResponse) -> SessionCheck {
    SessionCheck {
        authenticated: raw.authenticated.unwrap_or(false),
        user: raw.user.and_then(user),
    }
}

fn topic(raw: RawTopic) -> Option<Topic> {
    let id = raw.id.as_ref().and_then(super::dto::RawId::as_u64)?;
    Some(Topic::new(
        TopicId::new(id),
        raw.name.unwrap_or_else(|| "Untitled topic".to_string()),
        raw.description
            .unwrap_or_else(|| "No description".to_string()),
        raw.total_vocabularies.unwrap_or(0),
    ))
}

pub fn topics(response: TopicsResponse) -> Vec<Topic> {
    let rows = match response {
        TopicsResponse::List(rows) | TopicsResponse::Wrapped { topics: rows } => rows,
        TopicsResponse::Other(_) => return Vec::new(),
    };
    rows.into_iter().filter_map(topic).collect()
}

fn word(raw: RawWord, topic_id: TopicId) -> Option<VocabularyWord> {
    let id = raw.id.as_ref().and_then(super::dto::RawId::as_u64)?;
    Some(VocabularyWord::new(
        WordId::new(id),
        topic_id,
        raw.word.unwrap_or_else(|| "Unknown".to_string()),
        raw.meaning
            .unwrap_or_else(|| "No meaning provided".to_string()),
        raw.phonetic.unwrap_or_default(),
    ))
}

pub fn words(response: WordsResponse, topic_id: TopicId) -> Vec<VocabularyWord> {
    let rows = match response {
        WordsResponse::List(rows) | WordsResponse::Wrapped { data: rows } => rows,
        WordsResponse::Other(_) => return Vec::new(),
    };
    rows.into_iter()
        .filter_map(|raw| word(raw, topic_id))
        .collect()
}

fn question(raw: RawQuestion) -> Option<Question> {
    let id = raw.id.as_ref().and_then(super::dto::RawId::as_u64)?;
    let correct = raw.correct_answer.unwrap_or_default();

    let mut options = raw.options.unwrap_or_default();
    if options.is_empty() {
        // Backend rows that carry option1..option3 columns instead of an
        // options array: the correct answer is always one of the choices.
        options = [Some(correct.clone()), raw.option1, raw.option2, raw.option3]
            .into_iter()
            .flatten()
            .filter(|opt| !opt.trim().is_empty())
            .collect();
    }

    Question::new(
        QuestionId::new(id),
        raw.question.unwrap_or_default(),
        correct,
        options,
    )
    .ok()
}

pub fn questions(response: QuestionsResponse) -> Vec<Question> {
    let rows = match response {
        QuestionsResponse::List(rows) => rows,
        QuestionsResponse::Other(_) => return Vec::new(),
    };
    rows.into_iter().filter_map(question).collect()
}

fn leaderboard_entry(raw: RawLeaderboardEntry, index: usize) -> Option<LeaderboardEntry> {
    let user_id = raw.user_id.as_ref().and_then(super::dto::RawId::as_u64)?;
    let fallback_rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
    Some(LeaderboardEntry {
        user_id: UserId::new(user_id),
        username: raw
            .username
            .unwrap_or_else(|| format!("User {fallback_rank}")),
        topic_id: raw
            .topic_id
            .as_ref()
            .and_then(super::dto::RawId::as_u64)
            .map(TopicId::new),
        total_score: raw.total_score.unwrap_or(0),
        tests_completed: raw.tests_completed.unwrap_or(0),
        average_score: raw.average_score.unwrap_or(0.0),
        rank: raw.rank.unwrap_or(fallback_rank),
    })
}

pub fn leaderboard(response: LeaderboardResponse) -> Vec<LeaderboardEntry> {
    let rows = match response {
        LeaderboardResponse::List(rows)
        | LeaderboardResponse::Wrapped { leaderboard: rows } => rows,
        LeaderboardResponse::Other(_) => return Vec::new(),
    };
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, raw)| leaderboard_entry(raw, index))
        .collect()
}
