use sqlx::Error as SqlxError;
use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => RepositoryError::NotFound,
            SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::WorkerCrashed => {
                RepositoryError::Unavailable(err.to_string())
            }
            SqlxError::Io(_) | SqlxError::Tls(_) => RepositoryError::Unavailable(err.to_string()),
            SqlxError::Database(db) => {
                let code = db.code().map(|c| c.into_owned());
                match code.as_deref() {
                    Some(UNIQUE_VIOLATION) => RepositoryError::Conflict(db.message().to_string()),
                    Some(FOREIGN_KEY_VIOLATION) => {
                        RepositoryError::ForeignKey(db.message().to_string())
                    }
                    _ => RepositoryError::Sqlx(SqlxError::Database(db)),
                }
            }
            other => RepositoryError::Sqlx(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_becomes_not_found() {
        assert!(matches!(
            RepositoryError::from(SqlxError::RowNotFound),
            RepositoryError::NotFound
        ));
    }

    #[test]
    fn pool_exhaustion_is_unavailable() {
        assert!(matches!(
            RepositoryError::from(SqlxError::PoolTimedOut),
            RepositoryError::Unavailable(_)
        ));
        assert!(matches!(
            RepositoryError::from(SqlxError::PoolClosed),
            RepositoryError::Unavailable(_)
        ));
    }

    #[test]
    fn io_failure_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            RepositoryError::from(SqlxError::Io(io)),
            RepositoryError::Unavailable(_)
        ));
    }

    #[test]
    fn decode_failure_stays_sqlx() {
        let err = SqlxError::ColumnNotFound("customer_name".into());
        assert!(matches!(RepositoryError::from(err), RepositoryError::Sqlx(_)));
    }
}
