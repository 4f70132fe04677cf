mod plan;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use plan::{DEFAULT_SAMPLE_SIZE, QuizPlan, sample_questions};
pub use session::{QuizSession, QuizSubmission};
pub use workflow::QuizWorkflow;
