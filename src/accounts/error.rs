use thiserror::Error;

/// Infrastructure failure inside the account store. Business rejections are
/// outcome values, never this type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    PasswordHash(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
