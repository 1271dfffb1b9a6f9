use crate::catalog::{Catalog, QuestionFilter};
use crate::error::ApiError;
use crate::models::{Question, QuizBody};
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// Which questions a quiz draws from. Category id `0` on the wire means all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CategoryScope {
    All,
    Category(i32),
}

impl CategoryScope {
    pub fn from_id(id: i32) -> Self {
        if id == 0 {
            CategoryScope::All
        } else {
            CategoryScope::Category(id)
        }
    }

    fn filter(self) -> QuestionFilter {
        match self {
            CategoryScope::All => QuestionFilter::default(),
            CategoryScope::Category(id) => QuestionFilter::category(id),
        }
    }
}

/// A quiz turn. No question means every question in scope has been served.
#[derive(Serialize, Debug)]
pub struct QuizTurn {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

/// Splits a quiz request into the questions already served and the scope.
pub fn parse_request(body: QuizBody) -> Result<(Vec<i32>, CategoryScope), ApiError> {
    let previous = body
        .previous_questions
        .ok_or_else(|| ApiError::bad_request("previous_questions is required"))?;
    let category = body
        .quiz_category
        .ok_or_else(|| ApiError::bad_request("quiz_category is required"))?;
    Ok((previous, CategoryScope::from_id(category.id)))
}

/// Draws one question from `scope` that is not in `previous`, uniformly at random.
pub fn next_question<C, R>(
    catalog: &C,
    previous: &[i32],
    scope: CategoryScope,
    rng: &mut R,
) -> Result<QuizTurn, ApiError>
where
    C: Catalog + ?Sized,
    R: Rng + ?Sized,
{
    let pool = catalog.filter_questions(&scope.filter())?;
    if pool.is_empty() {
        return Err(ApiError::not_found(match scope {
            CategoryScope::All => "no questions to play".to_owned(),
            CategoryScope::Category(id) => format!("no questions in category {}", id),
        }));
    }
    let seen: HashSet<i32> = previous.iter().copied().collect();
    let question = pool.into_iter().filter(|q| !seen.contains(&q.id)).choose(rng);
    Ok(QuizTurn {
        success: true,
        question,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::models::QuizCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mixed_catalog() -> crate::memory::MemoryCatalog {
        catalog_with(vec![
            question(1, "Q", 1),
            question(2, "Q", 1),
            question(3, "Q", 2),
            question(4, "Q", 1),
            question(5, "Q", 3),
            question(6, "Q", 2),
        ])
    }

    #[test]
    fn never_repeats_and_stays_in_scope() {
        let catalog = mixed_catalog();
        let mut rng = StdRng::seed_from_u64(7);
        let previous = vec![1, 4];
        for _ in 0..200 {
            let turn = next_question(&catalog, &previous, CategoryScope::Category(1), &mut rng)
                .unwrap();
            let q = turn.question.unwrap();
            assert_eq!(q.id, 2);
            assert_eq!(q.category, 1);
        }
    }

    #[test]
    fn all_scope_draws_every_unseen_question() {
        let catalog = mixed_catalog();
        let mut rng = StdRng::seed_from_u64(11);
        let mut drawn = HashSet::new();
        for _ in 0..500 {
            let turn = next_question(&catalog, &[3], CategoryScope::All, &mut rng).unwrap();
            let id = turn.question.unwrap().id;
            assert_ne!(id, 3);
            drawn.insert(id);
        }
        let expected: HashSet<i32> = [1, 2, 4, 5, 6].iter().copied().collect();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn full_game_serves_each_question_once() {
        let catalog = mixed_catalog();
        let mut rng = StdRng::seed_from_u64(3);
        let mut previous = Vec::new();
        while let Some(q) = next_question(&catalog, &previous, CategoryScope::Category(2), &mut rng)
            .unwrap()
            .question
        {
            assert!(!previous.contains(&q.id));
            previous.push(q.id);
        }
        previous.sort();
        assert_eq!(previous, vec![3, 6]);
    }

    #[test]
    fn exhausted_pool_ends_game_successfully() {
        let catalog = mixed_catalog();
        let turn =
            next_question(&catalog, &[5, 99], CategoryScope::Category(3), &mut rand::thread_rng())
                .unwrap();
        assert!(turn.success);
        assert!(turn.question.is_none());
        let json = serde_json::to_value(&turn).unwrap();
        assert!(json.get("question").is_none());
    }

    #[test]
    fn empty_scope_is_not_found() {
        let catalog = mixed_catalog();
        let err = next_question(&catalog, &[], CategoryScope::Category(6), &mut rand::thread_rng())
            .unwrap_err();
        assert_eq!(err.code(), 404);
        let empty = catalog_with(Vec::new());
        let err = next_question(&empty, &[], CategoryScope::All, &mut rand::thread_rng())
            .unwrap_err();
        assert_eq!(err.code(), 404);
    }

    #[test]
    fn category_zero_means_all() {
        assert_eq!(CategoryScope::from_id(0), CategoryScope::All);
        assert_eq!(CategoryScope::from_id(4), CategoryScope::Category(4));
    }

    #[test]
    fn parse_request_requires_both_fields() {
        let missing_previous = QuizBody {
            previous_questions: None,
            quiz_category: Some(QuizCategory { id: 1 }),
        };
        assert_eq!(parse_request(missing_previous).unwrap_err().code(), 400);
        let missing_category = QuizBody {
            previous_questions: Some(vec![]),
            quiz_category: None,
        };
        assert_eq!(parse_request(missing_category).unwrap_err().code(), 400);
        let ok = QuizBody {
            previous_questions: Some(vec![1]),
            quiz_category: Some(QuizCategory { id: 0 }),
        };
        assert_eq!(parse_request(ok).unwrap(), (vec![1], CategoryScope::All));
    }
}
