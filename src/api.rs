//! HTTP surface: thin actix-web adapters over the catalog operations.
//!
//! Every handler takes its catalog from app data, runs the blocking catalog
//! work on the thread pool and answers with JSON. Failures render through
//! [`ApiError`] so clients always see `{success, error, message}`.

use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::models::{CategoryQuery, NewQuestionBody, PageQuery, QuizBody, SearchBody};
use crate::paginate::parse_page;
use crate::{questions, quiz, search};
use actix_web::{web, HttpResponse};

/// JSON extractor settings; malformed bodies become `400` envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

/// Query string extractor settings; unparsable query strings become `400` envelopes.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

fn parse_id(raw: &str, what: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("{} {:?}", what, raw)))
}

fn page_of(query: &PageQuery) -> i64 {
    parse_page(query.page.as_ref().map(|s| s.as_str()))
}

async fn list_categories<C>(catalog: web::Data<C>) -> Result<HttpResponse, ApiError>
where
    C: Catalog + Send + Sync + 'static,
{
    let result = web::block(move || search::list_categories(catalog.get_ref())).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn list_questions<C>(
    catalog: web::Data<C>,
    web::Query(query): web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError>
where
    C: Catalog + Send + Sync + 'static,
{
    let page = page_of(&query);
    let result = web::block(move || search::list_questions(catalog.get_ref(), page)).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn create_question<C>(
    catalog: web::Data<C>,
    web::Json(body): web::Json<NewQuestionBody>,
) -> Result<HttpResponse, ApiError>
where
    C: Catalog + Send + Sync + 'static,
{
    let result = web::block(move || questions::create_question(catalog.get_ref(), body)).await?;
    Ok(HttpResponse::Created().json(result))
}

async fn delete_question<C>(
    catalog: web::Data<C>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    C: Catalog + Send + Sync + 'static,
{
    let id = parse_id(&path, "question")?;
    let result = web::block(move || questions::delete_question(catalog.get_ref(), id)).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn search_questions<C>(
    catalog: web::Data<C>,
    web::Query(query): web::Query<PageQuery>,
    web::Json(body): web::Json<SearchBody>,
) -> Result<HttpResponse, ApiError>
where
    C: Catalog + Send + Sync + 'static,
{
    let page = page_of(&query);
    let term = body.search_term;
    let result = web::block(move || {
        search::search_questions(catalog.get_ref(), term.as_ref().map(|s| s.as_str()), page)
    })
    .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn questions_by_category<C>(
    catalog: web::Data<C>,
    path: web::Path<String>,
    web::Query(query): web::Query<CategoryQuery>,
) -> Result<HttpResponse, ApiError>
where
    C: Catalog + Send + Sync + 'static,
{
    let category = parse_id(&path, "category")?;
    let term = query.search_term;
    let result = web::block(move || {
        search::questions_by_category(
            catalog.get_ref(),
            category,
            term.as_ref().map(|s| s.as_str()),
        )
    })
    .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn play_quiz<C>(
    catalog: web::Data<C>,
    web::Json(body): web::Json<QuizBody>,
) -> Result<HttpResponse, ApiError>
where
    C: Catalog + Send + Sync + 'static,
{
    let (previous, scope) = quiz::parse_request(body)?;
    let result = web::block(move || {
        quiz::next_question(catalog.get_ref(), &previous, scope, &mut rand::thread_rng())
    })
    .await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::not_found("no such route"))
}

async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

pub fn config<C>(cfg: &mut web::ServiceConfig)
where
    C: Catalog + Send + Sync + 'static,
{
    cfg.service(
        web::resource("/categories")
            .route(web::get().to(list_categories::<C>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/categories/{id}/questions")
            .route(web::get().to(questions_by_category::<C>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/questions")
            .route(web::get().to(list_questions::<C>))
            .route(web::post().to(create_question::<C>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/questions/search")
            .route(web::post().to(search_questions::<C>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/questions/{id}")
            .route(web::delete().to(delete_question::<C>))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/quizzes")
            .route(web::post().to(play_quiz::<C>))
            .default_service(web::route().to(method_not_allowed)),
    );
}
