// ==========================================
// SteelWorks Operations - repository errors
// ==========================================
// Store failures are categorised but never swallowed; the store's own
// message is carried through unchanged.
// ==========================================

use rusqlite::ffi;
use thiserror::Error;

/// Repository error
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== lookups =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== connectivity =====
    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database busy or locked: {0}")]
    DatabaseBusy(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    // ===== constraints =====
    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("check constraint violated: {0}")]
    CheckConstraintViolation(String),

    // ===== aggregation =====
    #[error("value overflow: {field} for {context} exceeds the integer range")]
    ValueOverflow { field: String, context: String },

    // ===== row decoding =====
    #[error("field value error (field={field}): {message}")]
    FieldValueError { field: String, message: String },
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, msg) => {
                let msg = msg.unwrap_or_else(|| code.to_string());
                match code.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        RepositoryError::UniqueConstraintViolation(msg)
                    }
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => RepositoryError::ForeignKeyViolation(msg),
                    ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL => {
                        RepositoryError::CheckConstraintViolation(msg)
                    }
                    _ => match code.code {
                        rusqlite::ErrorCode::CannotOpen
                        | rusqlite::ErrorCode::NotADatabase
                        | rusqlite::ErrorCode::PermissionDenied => {
                            RepositoryError::DatabaseConnectionError(msg)
                        }
                        rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                            RepositoryError::DatabaseBusy(msg)
                        }
                        _ => RepositoryError::DatabaseQueryError(msg),
                    },
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            rusqlite::Error::FromSqlConversionFailure(idx, _, source) => {
                RepositoryError::FieldValueError {
                    field: format!("column {}", idx),
                    message: source.to_string(),
                }
            }
            rusqlite::Error::InvalidColumnType(idx, name, ty) => RepositoryError::FieldValueError {
                field: format!("{} (column {})", name, idx),
                message: format!("unexpected type {}", ty),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl RepositoryError {
    /// True for the three store-enforced constraint categories
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            RepositoryError::UniqueConstraintViolation(_)
                | RepositoryError::ForeignKeyViolation(_)
                | RepositoryError::CheckConstraintViolation(_)
        )
    }
}

/// Result alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;
