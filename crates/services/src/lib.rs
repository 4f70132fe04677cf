#![forbid(unsafe_code)]

pub mod api;
pub mod auth_gate;
pub mod auth_service;
pub mod catalog_service;
pub mod error;
pub mod quiz;
pub mod session;

pub use vocab_core::Clock;

pub use api::{ApiClient, ApiConfig, AuthApi, AuthPayload, LearningApi, SessionCheck};
pub use auth_gate::{AuthGate, GateState};
pub use auth_service::{AuthService, LoginOutcome};
pub use catalog_service::{CatalogService, Listing};
pub use error::{ApiError, AuthError, QuizError};
pub use quiz::{QuizSession, QuizSubmission, QuizWorkflow};
pub use session::{Navigator, SessionController};
