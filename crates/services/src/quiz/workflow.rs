use std::sync::Arc;

use crate::Clock;
use crate::api::LearningApi;
use crate::error::QuizError;
use vocab_core::model::TopicId;

use super::plan::{DEFAULT_SAMPLE_SIZE, sample_questions};
use super::session::QuizSession;

/// Orchestrates quiz start, stepping, and the single result submission.
#[derive(Clone)]
pub struct QuizWorkflow {
    clock: Clock,
    api: Arc<dyn LearningApi>,
    sample_size: usize,
}

impl QuizWorkflow {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn LearningApi>) -> Self {
        Self {
            clock,
            api,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Fetch the topic's question pool and start a session over a fresh
    /// random sample.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Api` when the pool cannot be fetched and
    /// `QuizError::Empty` when the topic has no questions.
    pub async fn start(&self, topic: TopicId) -> Result<QuizSession, QuizError> {
        let pool = self.api.questions(topic).await?;
        let plan = sample_questions(pool, self.sample_size);
        QuizSession::new(topic, plan, self.clock.now())
    }

    /// Answer the question under the cursor. Returns whether it was correct.
    ///
    /// # Errors
    ///
    /// Propagates the session's answering rules (`Completed`,
    /// `AlreadyAnswered`).
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        selected: &str,
    ) -> Result<bool, QuizError> {
        let question_id = session
            .current_question()
            .map(vocab_core::model::Question::id)
            .ok_or(QuizError::Completed)?;
        session.answer(question_id, selected)
    }

    /// Advance the cursor; on the last question this completes the session
    /// and submits the result exactly once. Returns true once complete.
    ///
    /// Submission failure does not fail the quiz: the learner still sees a
    /// completed attempt, and the failure is logged.
    pub async fn advance(&self, session: &mut QuizSession) -> bool {
        let finished = session.advance(self.clock.now());
        if finished {
            self.submit(session).await;
        }
        finished
    }

    /// Restart the same question sample.
    pub fn retry(&self, session: &mut QuizSession) {
        session.reset(self.clock.now());
    }

    async fn submit(&self, session: &mut QuizSession) {
        // The guard is claimed before the request is dispatched; a second
        // completion trigger racing this one finds it already taken.
        let submission = match session.begin_submission() {
            Ok(submission) => submission,
            Err(_) => return,
        };

        if let Err(err) = self.api.submit_result(session.topic_id(), &submission).await {
            tracing::warn!(topic = %session.topic_id(), error = %err, "quiz submission failed");
        }
    }
}
