use serde::{Deserialize, Serialize};

use crate::model::TopicId;

/// A vocabulary category grouping words and quiz questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub description: String,
    /// Number of words the backend reports for this topic.
    pub word_count: u32,
}

impl Topic {
    #[must_use]
    pub fn new(
        id: TopicId,
        name: impl Into<String>,
        description: impl Into<String>,
        word_count: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            word_count,
        }
    }
}
