use crate::catalog::Catalog;
use crate::error::{ApiError, StoreError};
use crate::models::{NewQuestion, NewQuestionBody};
use log::{info, warn};
use serde::Serialize;

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

#[derive(Serialize, Debug)]
pub struct Created {
    pub success: bool,
    pub created: i32,
}

#[derive(Serialize, Debug)]
pub struct Deleted {
    pub success: bool,
    pub deleted: i32,
}

fn validate(body: &NewQuestionBody) -> Result<(), ApiError> {
    let range = i64::from(MIN_DIFFICULTY)..=i64::from(MAX_DIFFICULTY);
    if !range.contains(&body.difficulty) {
        return Err(ApiError::unprocessable(format!(
            "difficulty must be between {} and {}, got {}",
            MIN_DIFFICULTY, MAX_DIFFICULTY, body.difficulty
        )));
    }
    if body.question.trim().is_empty() {
        return Err(ApiError::unprocessable("question text is empty"));
    }
    if body.answer.trim().is_empty() {
        return Err(ApiError::unprocessable("answer text is empty"));
    }
    Ok(())
}

pub fn create_question<C: Catalog + ?Sized>(
    catalog: &C,
    body: NewQuestionBody,
) -> Result<Created, ApiError> {
    validate(&body)?;
    let category = catalog
        .categories()?
        .into_iter()
        .find(|c| i64::from(c.id) == body.category)
        .ok_or_else(|| {
            ApiError::unprocessable(format!("category {} does not exist", body.category))
        })?;
    let stored = catalog.insert_question(NewQuestion {
        question: body.question,
        answer: body.answer,
        category: category.id,
        // in range after validation
        difficulty: body.difficulty as i32,
    })?;
    info!("created question {} in category {}", stored.id, stored.category);
    Ok(Created {
        success: true,
        created: stored.id,
    })
}

/// Deletes a question. Storage failures other than a missing id are
/// reported as unprocessable once the catalog has rolled the delete back.
pub fn delete_question<C: Catalog + ?Sized>(catalog: &C, id: i32) -> Result<Deleted, ApiError> {
    match catalog.delete_question(id) {
        Ok(()) => {
            info!("deleted question {}", id);
            Ok(Deleted {
                success: true,
                deleted: id,
            })
        }
        Err(StoreError::NotFound(id)) => Err(ApiError::not_found(format!("question {}", id))),
        Err(e) => {
            warn!("delete of question {} rolled back: {}", id, e);
            Err(ApiError::unprocessable(format!("unable to delete question {}", id)))
        }
    }
}
