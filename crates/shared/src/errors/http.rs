use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "Record not found!";

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl HttpError {
    pub fn not_found() -> Self {
        HttpError::NotFound(NOT_FOUND_MESSAGE.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::not_found(),
                RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
                RepositoryError::ForeignKey(msg) => {
                    HttpError::BadRequest(format!("Foreign key violation: {msg}"))
                }
                RepositoryError::Unavailable(msg) => {
                    error!("Storage unavailable: {msg}");
                    HttpError::ServiceUnavailable("Storage temporarily unavailable".into())
                }
                other => {
                    error!("Unhandled repository error: {other}");
                    HttpError::Internal("Internal server error".into())
                }
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            HttpError::BadRequest(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg)
            | HttpError::ServiceUnavailable(msg)
            | HttpError::Internal(msg) => msg,
        };

        (status, Json(ErrorResponse { error: msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_fixed_message() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::NotFound));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        match err {
            HttpError::NotFound(msg) => assert_eq!(msg, NOT_FOUND_MESSAGE),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn validation_is_bad_request() {
        let err = HttpError::from(ServiceError::Validation(vec![
            "items[0].quantity: Value out of range".into(),
        ]));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unavailable_storage_is_503_not_404() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::Unavailable(
            "pool timed out".into(),
        )));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::Conflict(
            "duplicate key".into(),
        )));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn raw_database_errors_are_not_exposed() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::Sqlx(
            sqlx::Error::Protocol("password authentication failed for user \"orders\"".into()),
        )));
        match err {
            HttpError::Internal(msg) => assert_eq!(msg, "Internal server error"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
