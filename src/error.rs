use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use failure::Fail;
use serde::Serialize;

/// Failures reported by a [`Catalog`](crate::catalog::Catalog).
#[derive(Debug, Fail)]
pub enum StoreError {
    #[fail(display = "question {} does not exist", _0)]
    NotFound(i32),
    #[fail(display = "query failed: {}", _0)]
    Query(#[cause] diesel::result::Error),
    #[fail(display = "unable to get database connection: {}", _0)]
    Pool(#[cause] r2d2::Error),
    #[fail(display = "catalog lock poisoned")]
    Poisoned,
    #[fail(display = "no question ids left to assign")]
    IdsExhausted,
    #[fail(display = "unable to read fixture: {}", _0)]
    Io(#[cause] std::io::Error),
    #[fail(display = "invalid fixture: {}", _0)]
    Fixture(#[cause] serde_json::Error),
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        StoreError::Query(e)
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(e: r2d2::Error) -> Self {
        StoreError::Pool(e)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Fixture(e)
    }
}

/// Every failure a request can end in. All of them render as the same envelope.
#[derive(Debug, Fail)]
pub enum ApiError {
    #[fail(display = "bad request: {}", _0)]
    BadRequest(String),
    #[fail(display = "resource not found: {}", _0)]
    NotFound(String),
    #[fail(display = "method not allowed")]
    MethodNotAllowed,
    #[fail(display = "unprocessable: {}", _0)]
    UnprocessableEntity(String),
    #[fail(display = "internal server error: {}", _0)]
    Internal(String),
}

impl ApiError {
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable<S: Into<String>>(message: S) -> Self {
        ApiError::UnprocessableEntity(message.into())
    }

    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

#[derive(Serialize)]
struct Envelope {
    success: bool,
    error: u16,
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Envelope {
            success: false,
            error: self.code(),
            message: self.to_string(),
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ApiError::NotFound(format!("question {}", id)),
            e => {
                log::error!("catalog failure: {}", e);
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<BlockingError<ApiError>> for ApiError {
    fn from(e: BlockingError<ApiError>) -> Self {
        match e {
            BlockingError::Error(e) => e,
            BlockingError::Canceled => ApiError::Internal("request was canceled".to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let e = ApiError::from(StoreError::NotFound(9999));
        assert_eq!(e.code(), 404);
    }

    #[test]
    fn other_store_failures_are_internal() {
        let e = ApiError::from(StoreError::Poisoned);
        assert_eq!(e.code(), 500);
    }

    #[test]
    fn codes_follow_taxonomy() {
        assert_eq!(ApiError::bad_request("x").code(), 400);
        assert_eq!(ApiError::MethodNotAllowed.code(), 405);
        assert_eq!(ApiError::unprocessable("x").code(), 422);
    }
}
