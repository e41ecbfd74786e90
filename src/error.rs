//! Error types for filemagic

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MagicError {
    #[error("Cannot allocate magic cookie")]
    EngineUnavailable,

    #[error("Cannot load magic database: {0}")]
    DatabaseLoadFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Magic query failed: {0}")]
    QueryFailed(String),
}

pub type Result<T> = std::result::Result<T, MagicError>;
