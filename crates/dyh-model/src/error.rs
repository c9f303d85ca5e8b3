use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid question id: {0:?}")]
    InvalidQuestionId(String),
    #[error("invalid strategy id: {0:?}")]
    InvalidStrategyId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
