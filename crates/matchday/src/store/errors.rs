use sea_orm::DbErr;
use thiserror::Error;

/// Errors that can occur during cache store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sea-orm.
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    /// The store returned something structurally unexpected (e.g. a missing
    /// PRAGMA row).
    #[error("unexpected store state: {message}")]
    Unexpected { message: String },
}

impl StoreError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
