use crate::catalog::{Catalog, QuestionFilter};
use crate::error::StoreError;
use crate::models::{Category, NewQuestion, Question};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Contents of a JSON fixture file.
#[derive(Deserialize, Default)]
pub struct Fixture {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    questions: Vec<Question>,
}

/// Catalog held in process memory. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCatalog {
    pub fn new(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let mut tables = Tables {
            categories,
            questions,
        };
        tables.categories.sort_by_key(|c| c.id);
        tables.questions.sort_by_key(|q| q.id);
        MemoryCatalog {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let fixture: Fixture = serde_json::from_reader(reader)?;
        Ok(Self::new(fixture.categories, fixture.questions))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn read<T, F: FnOnce(&Tables) -> T>(&self, f: F) -> Result<T, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&tables))
    }
}

impl Catalog for MemoryCatalog {
    fn questions(&self) -> Result<Vec<Question>, StoreError> {
        self.read(|t| t.questions.clone())
    }

    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.read(|t| t.categories.clone())
    }

    fn filter_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        self.read(|t| {
            t.questions
                .iter()
                .filter(|q| filter.matches(q))
                .cloned()
                .collect()
        })
    }

    fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let id = tables
            .questions
            .iter()
            .map(|q| q.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        let stored = Question {
            id,
            question: question.question,
            answer: question.answer,
            category: question.category,
            difficulty: question.difficulty,
        };
        tables.questions.push(stored.clone());
        Ok(stored)
    }

    fn delete_question(&self, id: i32) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let idx = tables
            .questions
            .iter()
            .position(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))?;
        tables.questions.remove(idx);
        Ok(())
    }
}
