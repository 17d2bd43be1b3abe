use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("behavior failed: {0}")]
    Failed(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
