//! Database-specific error types and conversions.

use taskhive_core::error::TaskhiveError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for TaskhiveError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => TaskhiveError::NotFound { entity, id },
            other => TaskhiveError::Database(other.to_string()),
        }
    }
}
