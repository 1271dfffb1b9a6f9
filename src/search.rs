use crate::catalog::{Catalog, QuestionFilter};
use crate::display::category_map;
use crate::error::ApiError;
use crate::models::Question;
use crate::paginate::{paginate, QUESTIONS_PER_PAGE};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug)]
pub struct CategoryList {
    pub success: bool,
    pub categories: BTreeMap<i32, String>,
    pub total_categories: usize,
}

#[derive(Serialize, Debug)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<Question>,
    /// Size of this page, not of the whole catalog.
    pub total_questions: usize,
    pub categories: BTreeMap<i32, String>,
    pub current_category: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SearchResults {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

#[derive(Serialize, Debug)]
pub struct CategoryQuestions {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<i32, String>,
    pub current_category: String,
    pub search_term: String,
}

pub fn list_categories<C: Catalog + ?Sized>(catalog: &C) -> Result<CategoryList, ApiError> {
    let categories = category_map(catalog.categories()?);
    Ok(CategoryList {
        success: true,
        total_categories: categories.len(),
        categories,
    })
}

/// One page of the whole catalog.
pub fn list_questions<C: Catalog + ?Sized>(catalog: &C, page: i64) -> Result<QuestionPage, ApiError> {
    let all = catalog.questions()?;
    let questions = paginate(&all, page).to_vec();
    if questions.is_empty() {
        return Err(ApiError::not_found(format!("no questions on page {}", page)));
    }
    Ok(QuestionPage {
        success: true,
        total_questions: questions.len(),
        questions,
        categories: category_map(catalog.categories()?),
        current_category: None,
    })
}

/// Substring search over question text. An empty term is rejected.
pub fn search_questions<C: Catalog + ?Sized>(
    catalog: &C,
    term: Option<&str>,
    page: i64,
) -> Result<SearchResults, ApiError> {
    let term = match term {
        Some(term) if !term.is_empty() => term,
        _ => return Err(ApiError::bad_request("searchTerm is required")),
    };
    let matches = catalog.filter_questions(&QuestionFilter::term(term))?;
    if matches.is_empty() {
        return Err(ApiError::not_found(format!("no questions match {:?}", term)));
    }
    let questions = paginate(&matches, page).to_vec();
    if questions.is_empty() {
        return Err(ApiError::not_found(format!("no search results on page {}", page)));
    }
    Ok(SearchResults {
        success: true,
        questions,
        total_questions: matches.len(),
        search_term: term.to_owned(),
    })
}

/// First page of a category, optionally narrowed by a substring. An empty or
/// absent term matches every question in the category.
pub fn questions_by_category<C: Catalog + ?Sized>(
    catalog: &C,
    category: i32,
    term: Option<&str>,
) -> Result<CategoryQuestions, ApiError> {
    let term = term.unwrap_or("");
    let filter = QuestionFilter {
        category: Some(category),
        term: Some(term.to_owned()),
    };
    let mut matches = catalog.filter_questions(&filter)?;
    if matches.is_empty() {
        return Err(ApiError::not_found(format!(
            "no questions in category {}",
            category
        )));
    }
    let total_questions = matches.len();
    matches.truncate(QUESTIONS_PER_PAGE);
    Ok(CategoryQuestions {
        success: true,
        questions: matches,
        total_questions,
        categories: category_map(catalog.categories()?),
        current_category: category.to_string(),
        search_term: term.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn list_pages_hold_at_most_ten() {
        let catalog = catalog_with((1..=23).map(|id| question(id, "Q", 1)).collect());
        for page in 1..=3 {
            let expected = 10i64.min(23 - 10 * (page - 1)) as usize;
            let result = list_questions(&catalog, page).unwrap();
            assert_eq!(result.questions.len(), expected);
            assert_eq!(result.total_questions, expected);
        }
        assert_eq!(list_questions(&catalog, 3).unwrap().questions[0].id, 21);
    }

    #[test]
    fn list_includes_categories() {
        let catalog = catalog_with(vec![question(1, "Q", 1)]);
        let result = list_questions(&catalog, 1).unwrap();
        assert_eq!(result.categories.get(&1).map(|s| &s[..]), Some("Science"));
        assert_eq!(result.categories.len(), 6);
        assert_eq!(result.current_category, None);
    }

    #[test]
    fn list_empty_page_is_not_found() {
        let catalog = catalog_with(Vec::new());
        assert_eq!(list_questions(&catalog, 1).unwrap_err().code(), 404);
        let catalog = catalog_with((1..=5).map(|id| question(id, "Q", 1)).collect());
        assert_eq!(list_questions(&catalog, 2).unwrap_err().code(), 404);
        assert_eq!(list_questions(&catalog, 0).unwrap_err().code(), 404);
    }

    #[test]
    fn empty_search_term_is_bad_request() {
        let catalog = catalog_with((1..=3).map(|id| question(id, "Q", 1)).collect());
        assert_eq!(search_questions(&catalog, Some(""), 1).unwrap_err().code(), 400);
        assert_eq!(search_questions(&catalog, None, 1).unwrap_err().code(), 400);
        let empty = catalog_with(Vec::new());
        assert_eq!(search_questions(&empty, Some(""), 1).unwrap_err().code(), 400);
    }

    #[test]
    fn search_is_case_insensitive_and_counts_all_matches() {
        let mut questions: Vec<_> = (1..=14)
            .map(|id| question(id, "What is the Title of this book?", 4))
            .collect();
        questions.push(question(15, "Who scored the goal?", 6));
        let catalog = catalog_with(questions);
        let result = search_questions(&catalog, Some("tItLe"), 1).unwrap();
        assert_eq!(result.questions.len(), 10);
        assert_eq!(result.total_questions, 14);
        assert_eq!(result.search_term, "tItLe");
        let second = search_questions(&catalog, Some("title"), 2).unwrap();
        assert_eq!(second.questions.len(), 4);
    }

    #[test]
    fn search_without_matches_is_not_found() {
        let catalog = catalog_with(vec![question(1, "What is H2O?", 1)]);
        assert_eq!(search_questions(&catalog, Some("zebra"), 1).unwrap_err().code(), 404);
        assert_eq!(search_questions(&catalog, Some("h2o"), 2).unwrap_err().code(), 404);
    }

    #[test]
    fn by_category_truncates_to_one_page() {
        let catalog = catalog_with((1..=12).map(|id| question(id, "Q", 3)).collect());
        let result = questions_by_category(&catalog, 3, None).unwrap();
        assert_eq!(result.questions.len(), 10);
        assert_eq!(result.total_questions, 12);
        assert_eq!(result.current_category, "3");
        assert_eq!(result.search_term, "");
    }

    #[test]
    fn by_category_orders_by_id() {
        let catalog = catalog_with(vec![
            question(9, "Q", 2),
            question(4, "Q", 2),
            question(5, "Q", 1),
            question(6, "Q", 2),
        ]);
        let ids: Vec<_> = questions_by_category(&catalog, 2, Some(""))
            .unwrap()
            .questions
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![4, 6, 9]);
    }

    #[test]
    fn by_category_applies_term() {
        let catalog = catalog_with(vec![
            question(1, "Which planet is red?", 1),
            question(2, "What is H2O?", 1),
            question(3, "Which planet is largest?", 2),
        ]);
        let result = questions_by_category(&catalog, 1, Some("PLANET")).unwrap();
        assert_eq!(result.total_questions, 1);
        assert_eq!(result.questions[0].id, 1);
        assert_eq!(result.search_term, "PLANET");
    }

    #[test]
    fn by_category_without_matches_is_not_found() {
        let catalog = catalog_with(vec![question(1, "Q", 1)]);
        assert_eq!(questions_by_category(&catalog, 5, None).unwrap_err().code(), 404);
    }

    #[test]
    fn categories_listing_counts_entries() {
        let catalog = catalog_with(Vec::new());
        let result = list_categories(&catalog).unwrap();
        assert_eq!(result.total_categories, 6);
        assert_eq!(result.categories.get(&6).map(|s| &s[..]), Some("Sports"));
    }
}
