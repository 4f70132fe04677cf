use rand::rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use vocab_core::model::Question;

/// How many questions a quiz asks when the pool is large enough.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// The fixed question sample one quiz attempt runs through.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizPlan {
    pub questions: Vec<Question>,
}

impl QuizPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when no questions were selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Draw up to `cap` distinct questions from the pool.
///
/// Duplicated ids are dropped first, then the pool is shuffled with an
/// unseeded rng and truncated. The sample size is `min(pool, cap)`;
/// sampling never invents questions the pool does not have.
#[must_use]
pub fn sample_questions(pool: Vec<Question>, cap: usize) -> QuizPlan {
    let mut seen = HashSet::new();
    let mut unique: Vec<Question> = pool
        .into_iter()
        .filter(|q| seen.insert(q.id()))
        .collect();

    let mut rng = rng();
    unique.as_mut_slice().shuffle(&mut rng);
    unique.truncate(cap);

    QuizPlan { questions: unique }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use vocab_core::model::QuestionId;

    fn build_question(id: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("word-{id}"),
            format!("answer-{id}"),
            vec![format!("answer-{id}"), "other".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn pool_of_twelve_samples_exactly_five_distinct() {
        let pool: Vec<Question> = (1..=12).map(build_question).collect();
        let pool_ids: HashSet<QuestionId> = pool.iter().map(Question::id).collect();

        let plan = sample_questions(pool, DEFAULT_SAMPLE_SIZE);

        assert_eq!(plan.total(), 5);
        let sampled: HashSet<QuestionId> = plan.questions.iter().map(Question::id).collect();
        assert_eq!(sampled.len(), 5, "sampled ids must be distinct");
        assert!(sampled.is_subset(&pool_ids));
    }

    #[test]
    fn small_pool_is_taken_whole() {
        let pool: Vec<Question> = (1..=3).map(build_question).collect();
        let plan = sample_questions(pool, DEFAULT_SAMPLE_SIZE);
        assert_eq!(plan.total(), 3);
    }

    #[test]
    fn duplicate_ids_are_dropped_before_sampling() {
        let mut pool: Vec<Question> = (1..=4).map(build_question).collect();
        pool.push(build_question(1));
        pool.push(build_question(2));

        let plan = sample_questions(pool, DEFAULT_SAMPLE_SIZE);

        let sampled: HashSet<QuestionId> = plan.questions.iter().map(Question::id).collect();
        assert_eq!(plan.total(), 4);
        assert_eq!(sampled.len(), 4);
    }

    #[test]
    fn empty_pool_yields_empty_plan() {
        let plan = sample_questions(Vec::new(), DEFAULT_SAMPLE_SIZE);
        assert!(plan.is_empty());
    }
}
