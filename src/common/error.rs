use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Index out of range: cell ({actual}, {predicted}) in a {class_number}x{class_number} confusion matrix")]
    IndexOutOfRange {
        actual: usize,
        predicted: usize,
        class_number: usize,
    },
    #[error("Dimension mismatch: predicted has {predicted} values, actual has {actual}")]
    DimensionMismatch { predicted: usize, actual: usize },
    #[error("Domain error: predicted[{index}] = {value} must be a positive finite number for the logarithm")]
    DomainMath { index: usize, value: f32 },
    #[error("Non-finite target: actual[{index}] = {value}")]
    NonFiniteTarget { index: usize, value: f32 },
    #[error("Division undefined: {0}")]
    DivisionUndefined(String),
    #[error("Evaluator already finalized, result was taken")]
    Finalized,
}

pub type Result<T> = std::result::Result<T, EvaluationError>;
