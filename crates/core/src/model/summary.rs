use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::TopicId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score ({score}) exceeds total questions ({total})")]
    ScoreOutOfRange { score: u32, total: u32 },
}

/// Aggregate result of one finished quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    topic_id: TopicId,
    score: u32,
    total_questions: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizSummary {
    /// Build a summary, validating time range and score bounds.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError` if `completed_at` precedes `started_at`
    /// or the score exceeds the question count.
    pub fn new(
        topic_id: TopicId,
        score: u32,
        total_questions: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizSummaryError> {
        if completed_at < started_at {
            return Err(QuizSummaryError::InvalidTimeRange);
        }
        if score > total_questions {
            return Err(QuizSummaryError::ScoreOutOfRange {
                score,
                total: total_questions,
            });
        }

        Ok(Self {
            topic_id,
            score,
            total_questions,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn topic_id(&self) -> TopicId {
        self.topic_id
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Whole seconds spent on the attempt.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        let secs = (self.completed_at - self.started_at).num_seconds();
        u64::try_from(secs).unwrap_or(0)
    }
}
