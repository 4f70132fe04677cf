//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use vocab_core::model::QuizSummaryError;

/// Errors surfaced by the HTTP request pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Transport failure: no response was received at all.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("http {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A 2xx response whose body could not be parsed.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// True for failures worth offering a retry for (anything that is not
    /// a definitive server rejection).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApiError::Status { status, .. } if status.is_client_error())
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// A required form field was empty; no request was sent.
    #[error("all fields are required")]
    MissingFields,

    /// Password and confirmation differ; no request was sent.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The login response carried no token; nothing was persisted.
    #[error("login response carried no token")]
    MissingToken,

    /// The registration response lacked a token or a user profile.
    #[error("registration response was incomplete")]
    IncompleteRegistration,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz subsystem.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for this topic")]
    Empty,

    #[error("quiz already completed")]
    Completed,

    #[error("quiz is not finished")]
    NotFinished,

    #[error("question already answered")]
    AlreadyAnswered,

    #[error("question is not part of this quiz")]
    UnknownQuestion,

    #[error("result already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Summary(#[from] QuizSummaryError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
