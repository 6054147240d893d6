use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::{EvaluationError, Result},
    util,
};

use super::Evaluator;

/// Average error over all processed examples, kept at the f64 precision of the running sum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorMeasureResult {
    pub average_error: f64,
    pub examples: usize,
}

/// Mean cross-entropy `-Σ actual·ln(predicted)` over a stream of examples.
///
/// Unlike the confusion-matrix evaluators, taking the result does not freeze
/// this one: it reads the running sum and more examples may follow.
#[derive(Clone, Debug, Default)]
pub struct CrossEntropyEvaluator {
    cumulative_error: f64,
    count: usize,
}

impl CrossEntropyEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of examples accepted so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Evaluator for CrossEntropyEvaluator {
    type Output = ErrorMeasureResult;

    /// Rejects the whole example when a prediction is not a positive finite number
    /// or a target is not finite, leaving the running sum untouched so the caller
    /// may skip it and go on.
    fn process_result(&mut self, predicted: &[f32], actual: &[f32]) -> Result<()> {
        util::ensure_same_len(predicted, actual)?;

        let mut example_error = 0.0f64;
        for (index, (&p, &t)) in predicted.iter().zip(actual).enumerate() {
            if !p.is_finite() || p <= 0.0 {
                warn!("Cross-entropy example rejected: predicted[{}] = {}", index, p);
                return Err(EvaluationError::DomainMath { index, value: p });
            }
            if !t.is_finite() {
                warn!("Cross-entropy example rejected: actual[{}] = {}", index, t);
                return Err(EvaluationError::NonFiniteTarget { index, value: t });
            }
            example_error += t as f64 * (p as f64).ln();
        }

        self.cumulative_error += example_error;
        self.count += 1;
        Ok(())
    }

    fn evaluation_result(&mut self) -> Result<ErrorMeasureResult> {
        if self.count == 0 {
            return Err(EvaluationError::DivisionUndefined(
                "average cross-entropy of zero examples".to_string(),
            ));
        }
        Ok(ErrorMeasureResult {
            average_error: -self.cumulative_error / self.count as f64,
            examples: self.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_example() {
        let mut evaluator = CrossEntropyEvaluator::new();
        evaluator.process_result(&[0.8, 0.2], &[1.0, 0.0]).unwrap();
        let result = evaluator.evaluation_result().unwrap();
        assert!((result.average_error - (-(0.8f32 as f64).ln())).abs() < 1e-6);
        assert_eq!(result.examples, 1);
    }

    #[test]
    fn test_average_over_examples() {
        let mut evaluator = CrossEntropyEvaluator::new();
        evaluator.process_result(&[0.9, 0.1], &[1.0, 0.0]).unwrap();
        evaluator.process_result(&[0.2, 0.8], &[0.0, 1.0]).unwrap();
        let result = evaluator.evaluation_result().unwrap();
        // (-ln 0.9 - ln 0.8) / 2
        assert!((result.average_error - 0.164252033486018).abs() < 1e-6);
    }

    #[test]
    fn test_no_examples() {
        let mut evaluator = CrossEntropyEvaluator::new();
        assert!(matches!(
            evaluator.evaluation_result(),
            Err(EvaluationError::DivisionUndefined(_))
        ));
    }

    #[test]
    fn test_non_positive_prediction_is_skippable() {
        let mut evaluator = CrossEntropyEvaluator::new();
        evaluator.process_result(&[0.5, 0.5], &[1.0, 0.0]).unwrap();

        let result = evaluator.process_result(&[1.0, 0.0], &[1.0, 0.0]);
        assert_eq!(result, Err(EvaluationError::DomainMath { index: 1, value: 0.0 }));
        assert!(evaluator.process_result(&[-0.1, 1.1], &[0.0, 1.0]).is_err());
        assert!(evaluator.process_result(&[f32::NAN, 1.0], &[0.0, 1.0]).is_err());
        assert_eq!(evaluator.count(), 1);

        let error = evaluator.evaluation_result().unwrap().average_error;
        assert!((error - std::f64::consts::LN_2).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let mut evaluator = CrossEntropyEvaluator::new();
        evaluator.process_result(&[0.8, 0.2], &[1.0, 0.0]).unwrap();

        let result = evaluator.process_result(&[f32::INFINITY, 0.5], &[0.0, 1.0]);
        assert!(matches!(result, Err(EvaluationError::DomainMath { index: 0, .. })));
        let result = evaluator.process_result(&[0.5, 0.5], &[f32::NAN, 1.0]);
        assert!(matches!(result, Err(EvaluationError::NonFiniteTarget { index: 0, .. })));
        let result = evaluator.process_result(&[0.5, 0.5], &[1.0, f32::NEG_INFINITY]);
        assert!(matches!(result, Err(EvaluationError::NonFiniteTarget { index: 1, .. })));
        assert_eq!(evaluator.count(), 1);

        let result = evaluator.evaluation_result().unwrap();
        assert!(result.average_error.is_finite());
        assert!((result.average_error - (-(0.8f32 as f64).ln())).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut evaluator = CrossEntropyEvaluator::new();
        let result = evaluator.process_result(&[0.5, 0.5], &[1.0]);
        assert_eq!(result, Err(EvaluationError::DimensionMismatch { predicted: 2, actual: 1 }));
    }

    #[test]
    fn test_result_is_repeatable() {
        let mut evaluator = CrossEntropyEvaluator::new();
        evaluator.process_result(&[0.3, 0.7], &[0.0, 1.0]).unwrap();
        let first = evaluator.evaluation_result().unwrap();
        let second = evaluator.evaluation_result().unwrap();
        assert_eq!(first.average_error.to_bits(), second.average_error.to_bits());
    }
}
