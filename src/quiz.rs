use std::collections::HashSet;

use crate::db::Question;

/// Which questions a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    AnyCategory,
    Category(i64),
}

impl QuizScope {
    /// Category id 0 is how the front end asks for every category.
    pub fn from_category_id(id: i64) -> Self {
        match id {
            0 => QuizScope::AnyCategory,
            id => QuizScope::Category(id),
        }
    }

    pub fn category_id(self) -> Option<i64> {
        match self {
            QuizScope::AnyCategory => None,
            QuizScope::Category(id) => Some(id),
        }
    }

    pub fn label(self) -> String {
        match self {
            QuizScope::AnyCategory => "all".to_owned(),
            QuizScope::Category(id) => id.to_string(),
        }
    }
}

/// Picks the next quiz question out of `candidates`, which are expected in a
/// random order.
///
/// The first candidate is taken when nothing was asked yet. Otherwise the last
/// candidate that was not asked before wins.
pub fn next_question(candidates: Vec<Question>, previous: &[i64]) -> Option<Question> {
    if previous.is_empty() {
        return candidates.into_iter().next();
    }
    let asked: HashSet<i64> = previous.iter().copied().collect();
    candidates
        .into_iter()
        .filter(|question| !asked.contains(&question.id))
        .last()
}
