pub mod common;
pub mod evaluator;
pub mod metric;

pub use common::*;
pub use evaluator::*;
pub use metric::*;

pub use common::error::EvaluationError;
pub use common::matrix::DenseMatrix;
