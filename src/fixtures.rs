use crate::memory::MemoryCatalog;
use crate::models::{Category, Question};

pub fn categories() -> Vec<Category> {
    ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        .iter()
        .enumerate()
        .map(|(idx, name)| Category {
            id: idx as i32 + 1,
            type_: (*name).to_owned(),
        })
        .collect()
}

pub fn question(id: i32, text: &str, category: i32) -> Question {
    Question {
        id,
        question: text.to_owned(),
        answer: format!("answer {}", id),
        category,
        difficulty: 2,
    }
}

pub fn catalog_with(questions: Vec<Question>) -> MemoryCatalog {
    MemoryCatalog::new(categories(), questions)
}
