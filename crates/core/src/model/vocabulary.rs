use serde::{Deserialize, Serialize};

use crate::model::{TopicId, WordId};

/// A single word card within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub id: WordId,
    pub topic_id: TopicId,
    pub word: String,
    pub meaning: String,
    /// Phonetic transcription; may be empty when the backend has none.
    pub phonetic: String,
}

impl VocabularyWord {
    #[must_use]
    pub fn new(
        id: WordId,
        topic_id: TopicId,
        word: impl Into<String>,
        meaning: impl Into<String>,
        phonetic: impl Into<String>,
    ) -> Self {
        Self {
            id,
            topic_id,
            word: word.into(),
            meaning: meaning.into(),
            phonetic: phonetic.into(),
        }
    }
}
