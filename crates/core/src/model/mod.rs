mod ids;
mod leaderboard;
mod question;
mod summary;
mod topic;
mod user;
mod vocabulary;

pub use ids::{ParseIdError, QuestionId, TopicId, UserId, WordId};
pub use leaderboard::LeaderboardEntry;
pub use question::{Question, QuestionError};
pub use summary::{QuizSummary, QuizSummaryError};
pub use topic::Topic;
pub use user::UserProfile;
pub use vocabulary::VocabularyWord;
