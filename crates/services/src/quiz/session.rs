use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

use vocab_core::model::{Question, QuestionId, QuizSummary, TopicId};

use super::plan::QuizPlan;
use crate::error::QuizError;

/// Payload for exactly one result submission.
///
/// Obtained only through [`QuizSession::begin_submission`], which flips the
/// one-shot guard before handing it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    pub answers: BTreeMap<QuestionId, String>,
    /// Whole seconds between quiz start and completion.
    pub completion_time: u64,
}

/// In-memory state machine for one quiz attempt over a topic.
///
/// Lifecycle: built from a non-empty plan (`in progress`), stepped with
/// `answer`/`advance`, marked complete by the final `advance`, submitted
/// at most once, and optionally `reset` for a retry over the same sample.
pub struct QuizSession {
    topic_id: TopicId,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    answers: BTreeMap<QuestionId, String>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    submitted: bool,
}

impl QuizSession {
    /// Start a session over the sampled questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` when the plan holds no questions; an
    /// empty pool is a terminal error state, not a completed quiz.
    pub fn new(
        topic_id: TopicId,
        plan: QuizPlan,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if plan.is_empty() {
            return Err(QuizError::Empty);
        }

        Ok(Self {
            topic_id,
            questions: plan.questions,
            current: 0,
            score: 0,
            answers: BTreeMap::new(),
            started_at,
            completed_at: None,
            submitted: false,
        })
    }

    #[must_use]
    pub fn topic_id(&self) -> TopicId {
        self.topic_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total number of questions in this attempt.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based cursor position.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of questions answered so far.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    /// Record an answer for a question in the sample.
    ///
    /// Answering is exactly-once per question, enforced here rather than
    /// left to UI discipline. Returns whether the answer was correct.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` after completion,
    /// `QuizError::UnknownQuestion` for ids outside the sample, and
    /// `QuizError::AlreadyAnswered` on re-answering.
    pub fn answer(&mut self, question_id: QuestionId, selected: &str) -> Result<bool, QuizError> {
        if self.is_complete() {
            return Err(QuizError::Completed);
        }

        let Some(question) = self.questions.iter().find(|q| q.id() == question_id) else {
            return Err(QuizError::UnknownQuestion);
        };

        if self.answers.contains_key(&question_id) {
            return Err(QuizError::AlreadyAnswered);
        }

        let correct = question.is_correct(selected);
        self.answers.insert(question_id, selected.to_string());
        if correct {
            self.score += 1;
        }

        Ok(correct)
    }

    /// Move the cursor forward, or mark the session complete on the last
    /// question. Returns true once the session is complete.
    pub fn advance(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_complete() {
            return true;
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            false
        } else {
            self.completed_at = Some(now);
            true
        }
    }

    /// Take the one-shot submission payload.
    ///
    /// The `submitted` flag flips here, synchronously, so callers can claim
    /// the payload before any network dispatch; a second near-simultaneous
    /// completion trigger gets `AlreadySubmitted` instead of a payload.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` before completion and
    /// `QuizError::AlreadySubmitted` on any call after the first.
    pub fn begin_submission(&mut self) -> Result<QuizSubmission, QuizError> {
        let Some(completed_at) = self.completed_at else {
            return Err(QuizError::NotFinished);
        };
        if self.submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        self.submitted = true;

        let secs = (completed_at - self.started_at).num_seconds();
        Ok(QuizSubmission {
            answers: self.answers.clone(),
            completion_time: u64::try_from(secs).unwrap_or(0),
        })
    }

    /// Summary of a completed attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` before completion.
    pub fn summary(&self) -> Result<QuizSummary, QuizError> {
        let completed_at = self.completed_at.ok_or(QuizError::NotFinished)?;
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Ok(QuizSummary::new(
            self.topic_id,
            self.score,
            total,
            self.started_at,
            completed_at,
        )?)
    }

    /// Retry: back to the start of the same question sample with all
    /// progress, the submission guard, and timestamps reset.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.started_at = now;
        self.completed_at = None;
        self.submitted = false;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("topic_id", &self.topic_id)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("completed_at", &self.completed_at)
            .field("submitted", &self.submitted)
            .finish_non_exhaustive()
    }
}
