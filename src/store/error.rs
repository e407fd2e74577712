//! Store error taxonomy and database error classification.

use sqlx::error::ErrorKind;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::ParseEnumError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A unique column (company name, email, registration number) clashed.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A foreign key did not resolve to an existing row.
    #[error("Reference error: {0}")]
    Reference(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn missing_reference(entity: &'static str, id: Uuid) -> Self {
        Self::Reference(format!("{entity} {id} does not exist"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let message = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return Self::ConstraintViolation(message),
                ErrorKind::ForeignKeyViolation => return Self::Reference(message),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    return Self::Validation(message)
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}

impl From<ParseEnumError> for StoreError {
    fn from(err: ParseEnumError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
