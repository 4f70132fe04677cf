use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("question has no correct answer")]
    EmptyAnswer,

    #[error("options do not contain the correct answer")]
    AnswerNotInOptions,
}

/// A multiple-choice quiz question.
///
/// Invariant: `options` always contains `correct_answer`, so rendering the
/// options is guaranteed to offer the right one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    correct_answer: String,
    options: Vec<String>,
}

impl Question {
    /// Build a question, validating the option-set invariant.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or answer is empty, or if the
    /// options do not include the correct answer.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        if !options.iter().any(|opt| opt == &correct_answer) {
            return Err(QuestionError::AnswerNotInOptions);
        }

        Ok(Self {
            id,
            prompt,
            correct_answer,
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns true when the selected option matches the correct answer.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_answer == selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(opts: &[&str]) -> Vec<String> {
        opts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn accepts_answer_present_in_options() {
        let q = Question::new(
            QuestionId::new(1),
            "apple",
            "quả táo",
            options(&["quả táo", "quả cam", "quả chuối"]),
        )
        .unwrap();
        assert!(q.is_correct("quả táo"));
        assert!(!q.is_correct("quả cam"));
    }

    #[test]
    fn rejects_answer_missing_from_options() {
        let err = Question::new(
            QuestionId::new(1),
            "apple",
            "quả táo",
            options(&["quả cam", "quả chuối"]),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::AnswerNotInOptions);
    }

    #[test]
    fn rejects_blank_prompt() {
        let err = Question::new(QuestionId::new(1), "  ", "a", options(&["a"])).unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_blank_answer() {
        let err = Question::new(QuestionId::new(1), "apple", "", options(&["a"])).unwrap_err();
        assert_eq!(err, QuestionError::EmptyAnswer);
    }
}
