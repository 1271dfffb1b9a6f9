use crate::models::{Category, Question};
use std::collections::BTreeMap;

/// `{id: type}` map as sent to clients, keyed in id order.
pub fn category_map(categories: Vec<Category>) -> BTreeMap<i32, String> {
    categories.into_iter().map(|c| (c.id, c.type_)).collect()
}

fn collapse(s: &str) -> String {
    s.lines()
        .map(|s| s.trim())
        .filter(|s| *s != "")
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line rendering for the terminal, e.g. `12 [Science, 3/5] What is H2O?`.
pub fn format_question(q: &Question, categories: &BTreeMap<i32, String>) -> String {
    let category = categories
        .get(&q.category)
        .map(|s| &s[..])
        .unwrap_or("UNKNOWN CATEGORY");
    format!(
        "{} [{}, {}/5] {}",
        q.id,
        category,
        q.difficulty,
        collapse(&q.question)
    )
}

pub fn format_answer(q: &Question) -> String {
    collapse(&q.answer)
}
