use crate::catalog::QuestionFilter;
use crate::error::StoreError;
use crate::models::*;
use crate::schema::*;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::QueryResult;

pub fn get_questions(conn: &PgConnection) -> QueryResult<Vec<Question>> {
    questions::table.order(questions::id.asc()).load(conn)
}

pub fn get_categories(conn: &PgConnection) -> QueryResult<Vec<Category>> {
    categories::table.order(categories::id.asc()).load(conn)
}

pub fn filter_questions(conn: &PgConnection, filter: &QuestionFilter) -> QueryResult<Vec<Question>> {
    let mut query = questions::table.order(questions::id.asc()).into_boxed();
    if let Some(category) = filter.category {
        query = query.filter(questions::category.eq(category));
    }
    if let Some(term) = &filter.term {
        query = query.filter(questions::question.ilike(like_pattern(term)));
    }
    query.load(conn)
}

pub fn insert_question(conn: &PgConnection, question: &NewQuestion) -> QueryResult<Question> {
    diesel::insert_into(questions::table)
        .values(question)
        .get_result(conn)
}

/// Looks the question up and deletes it inside one transaction.
pub fn delete_question(conn: &PgConnection, id: i32) -> Result<(), StoreError> {
    conn.transaction::<_, StoreError, _>(|| {
        let found = questions::table
            .find(id)
            .select(questions::id)
            .first::<i32>(conn)
            .optional()?;
        if found.is_none() {
            return Err(StoreError::NotFound(id));
        }
        diesel::delete(questions::table.find(id)).execute(conn)?;
        Ok(())
    })
}

/// `%term%` with LIKE metacharacters in `term` matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == '%' || c == '_' || c == '\\' {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
