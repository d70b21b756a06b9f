mod error;
mod http;
mod repository;
mod service;

pub use self::error::ErrorResponse;
pub use self::http::{HttpError, NOT_FOUND_MESSAGE};
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
