//! Metadata store error types.

use thiserror::Error;

/// SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

/// Metadata store operation errors.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The `repos` table has not been created yet.
    #[error("schema missing: {0}")]
    SchemaMissing(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl MetadataError {
    /// Whether this error means the table is absent and a seed would repair it.
    pub fn is_schema_missing(&self) -> bool {
        matches!(self, MetadataError::SchemaMissing(_))
    }
}

impl From<sqlx::Error> for MetadataError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.code().as_deref() == Some(UNDEFINED_TABLE) {
                return MetadataError::SchemaMissing(db_err.message().to_string());
            }
        }
        MetadataError::Database(err)
    }
}

impl From<repomirror_core::Error> for MetadataError {
    fn from(err: repomirror_core::Error) -> Self {
        match err {
            repomirror_core::Error::InvalidRepository(msg) => MetadataError::Constraint(msg),
        }
    }
}

/// Result type for metadata operations.
pub type MetadataResult<T> = std::result::Result<T, MetadataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_missing_is_classified() {
        let err = MetadataError::SchemaMissing("relation \"repos\" does not exist".to_string());
        assert!(err.is_schema_missing());
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_non_database_sqlx_errors_stay_database() {
        let err = MetadataError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_schema_missing());
        assert!(matches!(err, MetadataError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_invalid_repository_becomes_constraint() {
        let err = MetadataError::from(repomirror_core::Error::InvalidRepository(
            "name too long".to_string(),
        ));
        assert!(matches!(err, MetadataError::Constraint(_)));
    }
}
