use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use taxonomist_core::errors::Error as CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                e if e.is_not_found() => (StatusCode::NOT_FOUND, e.to_string()),
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxonomist_core::errors::{DatabaseError, ValidationError};
    use taxonomist_core::taxonomies::TaxonomyError;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn core_errors_map_to_status_codes() {
        let not_found = CoreError::from(TaxonomyError::taxonomy_not_found("genre"));
        assert_eq!(status_of(not_found.into()), StatusCode::NOT_FOUND);

        let missing_row = CoreError::from(DatabaseError::NotFound("term".to_string()));
        assert_eq!(status_of(missing_row.into()), StatusCode::NOT_FOUND);

        let invalid = CoreError::from(ValidationError::InvalidInput("bad seed".to_string()));
        assert_eq!(status_of(invalid.into()), StatusCode::BAD_REQUEST);

        let offline = CoreError::from(DatabaseError::QueryFailed("disk I/O".to_string()));
        assert_eq!(status_of(offline.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn request_errors_map_to_status_codes() {
        assert_eq!(status_of(ApiError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ApiError::BadRequest("bad id".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
