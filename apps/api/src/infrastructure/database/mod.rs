pub mod pool;

use crate::domain::shared::errors::DomainError;

/// Name of the unique constraint a write violated, if that is why it failed.
pub fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound("Record not found".into()),
            sqlx::Error::PoolTimedOut => {
                tracing::warn!("Database connection pool exhausted, timing out");
                DomainError::InfrastructureError("Connection pool exhausted".into())
            }
            other => {
                tracing::error!(database_error = %other);
                DomainError::InfrastructureError(other.to_string())
            }
        }
    }
}
