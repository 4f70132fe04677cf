use std::sync::Arc;

use crate::api::LearningApi;
use vocab_core::model::{LeaderboardEntry, Topic, TopicId, VocabularyWord};

/// Outcome of a non-critical read.
///
/// Readers never see an absent collection: a failed request is tagged
/// `Unavailable` with a displayable message so the UI can offer a retry,
/// and an empty backend result is a plain empty state.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    Populated(Vec<T>),
    Empty,
    Unavailable(String),
}

impl<T> Listing<T> {
    fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Listing::Empty
        } else {
            Listing::Populated(items)
        }
    }

    /// The items, if any; both `Empty` and `Unavailable` yield none.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Listing::Populated(items) => items,
            Listing::Empty | Listing::Unavailable(_) => &[],
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Listing::Unavailable(_))
    }
}

/// Read access to topics, word cards, and leaderboards.
///
/// Errors from these reads degrade to a retryable `Unavailable` listing
/// instead of propagating; only state-mutating calls surface errors to
/// their callers.
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn LearningApi>,
}

impl CatalogService {
    #[must_use]
    pub fn new(api: Arc<dyn LearningApi>) -> Self {
        Self { api }
    }

    pub async fn topics(&self) -> Listing<Topic> {
        match self.api.topics().await {
            Ok(topics) => Listing::from_items(topics),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load topics");
                Listing::Unavailable("Could not load topics.".to_string())
            }
        }
    }

    pub async fn words(&self, topic: TopicId) -> Listing<VocabularyWord> {
        match self.api.vocabulary(topic).await {
            Ok(words) => Listing::from_items(words),
            Err(err) => {
                tracing::warn!(topic = %topic, error = %err, "failed to load vocabulary");
                Listing::Unavailable("Could not load words for this topic.".to_string())
            }
        }
    }

    pub async fn leaderboard(&self, topic: Option<TopicId>) -> Listing<LeaderboardEntry> {
        match self.api.leaderboard(topic).await {
            Ok(entries) => Listing::from_items(entries),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load leaderboard");
                Listing::Unavailable("Could not load the leaderboard.".to_string())
            }
        }
    }

    /// Built-in placeholder topics shown when the backend is unreachable.
    #[must_use]
    pub fn sample_topics() -> Vec<Topic> {
        vec![
            Topic::new(
                TopicId::new(1),
                "Từ vựng về gia đình",
                "Học từ vựng về các thành viên trong gia đình và mối quan hệ",
                25,
            ),
            Topic::new(
                TopicId::new(2),
                "Từ vựng về trường học",
                "Học từ vựng về trường học, lớp học và các hoạt động học tập",
                30,
            ),
            Topic::new(
                TopicId::new(3),
                "Từ vựng về động vật",
                "Từ vựng về các loại động vật trong tự nhiên",
                40,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::quiz::QuizSubmission;
    use async_trait::async_trait;
    use vocab_core::model::Question;

    struct FailingApi;

    #[async_trait]
    impl LearningApi for FailingApi {
        async fn topics(&self) -> Result<Vec<Topic>, ApiError> {
            Err(ApiError::Decode("connection refused".into()))
        }

        async fn vocabulary(&self, _: TopicId) -> Result<Vec<VocabularyWord>, ApiError> {
            Err(ApiError::Decode("connection refused".into()))
        }

        async fn questions(&self, _: TopicId) -> Result<Vec<Question>, ApiError> {
            Err(ApiError::Decode("connection refused".into()))
        }

        async fn leaderboard(
            &self,
            _: Option<TopicId>,
        ) -> Result<Vec<LeaderboardEntry>, ApiError> {
            Ok(Vec::new())
        }

        async fn submit_result(
            &self,
            _: TopicId,
            _: &QuizSubmission,
        ) -> Result<(), ApiError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_topics_read_is_unavailable_not_absent() {
        let catalog = CatalogService::new(Arc::new(FailingApi));

        let listing = catalog.topics().await;

        assert!(listing.is_unavailable());
        assert!(listing.items().is_empty());
    }

    #[tokio::test]
    async fn empty_leaderboard_is_an_empty_state() {
        let catalog = CatalogService::new(Arc::new(FailingApi));

        let listing = catalog.leaderboard(None).await;

        assert_eq!(listing, Listing::Empty);
        assert!(!listing.is_unavailable());
    }

    #[test]
    fn sample_topics_are_available_offline() {
        assert_eq!(CatalogService::sample_topics().len(), 3);
    }
}
