use thiserror::Error;

#[derive(Debug, Error)]
pub enum PremiaError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type PremiaResult<T> = Result<T, PremiaError>;
