use crate::actions;
use crate::error::StoreError;
use crate::models::{Category, NewQuestion, Question};
use diesel::pg::PgConnection;
use diesel::r2d2::ConnectionManager;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Storage for questions and categories.
///
/// Every call stands alone; implementations own their transactional isolation.
/// Listing methods return records ordered by id ascending.
pub trait Catalog {
    fn questions(&self) -> Result<Vec<Question>, StoreError>;

    fn categories(&self) -> Result<Vec<Category>, StoreError>;

    fn filter_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError>;

    /// Stores `question` and returns it with its assigned id.
    fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no question has this id.
    fn delete_question(&self, id: i32) -> Result<(), StoreError>;
}

/// Category equality and case-insensitive substring match over question text.
/// `None` on either axis matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestionFilter {
    pub category: Option<i32>,
    pub term: Option<String>,
}

impl QuestionFilter {
    pub fn category(id: i32) -> Self {
        QuestionFilter {
            category: Some(id),
            term: None,
        }
    }

    pub fn term<S: Into<String>>(term: S) -> Self {
        QuestionFilter {
            category: None,
            term: Some(term.into()),
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        if let Some(category) = self.category {
            if question.category != category {
                return false;
            }
        }
        match &self.term {
            Some(term) => question
                .question
                .to_lowercase()
                .contains(&term.to_lowercase()),
            None => true,
        }
    }
}

/// PostgreSQL catalog; checks a connection out of the pool for every call.
#[derive(Clone)]
pub struct PgCatalog {
    pool: DbPool,
}

impl PgCatalog {
    pub fn new(pool: DbPool) -> Self {
        PgCatalog { pool }
    }
}

impl Catalog for PgCatalog {
    fn questions(&self) -> Result<Vec<Question>, StoreError> {
        let db = self.pool.get()?;
        Ok(actions::get_questions(&db)?)
    }

    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let db = self.pool.get()?;
        Ok(actions::get_categories(&db)?)
    }

    fn filter_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        let db = self.pool.get()?;
        Ok(actions::filter_questions(&db, filter)?)
    }

    fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let db = self.pool.get()?;
        Ok(actions::insert_question(&db, &question)?)
    }

    fn delete_question(&self, id: i32) -> Result<(), StoreError> {
        let db = self.pool.get()?;
        actions::delete_question(&db, id)
    }
}
