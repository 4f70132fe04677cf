use serde::{Deserialize, Serialize};

use crate::model::{TopicId, UserId};

/// Read-only ranked summary of a user's aggregated quiz performance.
///
/// The backend computes all fields; the client never mutates an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub username: String,
    /// Absent on the overall (cross-topic) leaderboard.
    pub topic_id: Option<TopicId>,
    pub total_score: u32,
    pub tests_completed: u32,
    pub average_score: f64,
    pub rank: u32,
}
