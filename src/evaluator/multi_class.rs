use crate::{
    error::Result,
    metric::{arg_max_class, ConfusionMatrix, MetricResult},
    util,
};

use super::{tally::Tally, Evaluator};

/// One-vs-many evaluator: both vectors are reduced to a class with the arg-max rule.
#[derive(Clone, Debug)]
pub struct MultiClassEvaluator {
    tally: Tally,
}

impl MultiClassEvaluator {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let matrix = ConfusionMatrix::build(labels, labels.len())?;
        Ok(Self {
            tally: Tally::new(matrix),
        })
    }

    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        self.tally.matrix()
    }

    pub fn is_finalized(&self) -> bool {
        self.tally.is_finalized()
    }

    pub fn merge(&mut self, other: &MultiClassEvaluator) -> Result<()> {
        self.tally.merge(&other.tally)
    }
}

impl Evaluator for MultiClassEvaluator {
    type Output = MetricResult;

    fn process_result(&mut self, predicted: &[f32], actual: &[f32]) -> Result<()> {
        util::ensure_same_len(predicted, actual)?;
        let actual_class = arg_max_class(actual)?;
        let predicted_class = arg_max_class(predicted)?;
        self.tally.record(actual_class, predicted_class)
    }

    fn evaluation_result(&mut self) -> Result<MetricResult> {
        self.tally.report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationError;

    fn abc() -> MultiClassEvaluator {
        MultiClassEvaluator::new(&["A", "B", "C"]).unwrap()
    }

    #[test]
    fn test_matching_predictions_fill_diagonal() {
        let mut evaluator = abc();
        evaluator.process_result(&[0.8, 0.1, 0.1], &[1.0, 0.0, 0.0]).unwrap();
        evaluator.process_result(&[0.2, 0.7, 0.1], &[0.0, 1.0, 0.0]).unwrap();
        evaluator.process_result(&[0.6, 0.3, 0.1], &[1.0, 0.0, 0.0]).unwrap();

        let matrix = evaluator.confusion_matrix();
        assert_eq!(matrix.diagonal_total(), matrix.grand_total());
        assert_eq!(matrix.cell_count(0, 0).unwrap(), 2);

        let result = evaluator.evaluation_result().unwrap();
        for label in ["A", "B"] {
            let metric = result.class(label).unwrap();
            assert!((metric.precision - 1.0).abs() < 1e-6);
            assert!((metric.recall - 1.0).abs() < 1e-6);
        }
        assert_eq!(result.class("C").unwrap().support, 0);
        assert_eq!(result.accuracy, Some(1.0));
    }

    #[test]
    fn test_misclassification_lands_off_diagonal() {
        let mut evaluator = abc();
        evaluator.process_result(&[0.1, 0.2, 0.7], &[0.0, 1.0, 0.0]).unwrap();
        assert_eq!(evaluator.confusion_matrix().cell_count(1, 2).unwrap(), 1);
        assert_eq!(evaluator.evaluation_result().unwrap().accuracy, Some(0.0));
    }

    #[test]
    fn test_tie_uses_first_class() {
        let mut evaluator = abc();
        evaluator.process_result(&[0.4, 0.4, 0.2], &[0.0, 0.0, 1.0]).unwrap();
        assert_eq!(evaluator.confusion_matrix().cell_count(2, 0).unwrap(), 1);
    }

    #[test]
    fn test_index_beyond_matrix() {
        let mut evaluator = MultiClassEvaluator::new(&["A", "B"]).unwrap();
        let result = evaluator.process_result(&[0.1, 0.2, 0.7], &[1.0, 0.0, 0.0]);
        assert_eq!(
            result,
            Err(EvaluationError::IndexOutOfRange {
                actual: 0,
                predicted: 2,
                class_number: 2
            })
        );
        assert_eq!(evaluator.confusion_matrix().grand_total(), 0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut evaluator = abc();
        let result = evaluator.process_result(&[0.1, 0.9], &[1.0, 0.0, 0.0]);
        assert_eq!(result, Err(EvaluationError::DimensionMismatch { predicted: 2, actual: 3 }));
    }

    #[test]
    fn test_merge_partitions() {
        let pairs: [([f32; 3], [f32; 3]); 4] = [
            ([0.8, 0.1, 0.1], [1.0, 0.0, 0.0]),
            ([0.1, 0.1, 0.8], [0.0, 1.0, 0.0]),
            ([0.3, 0.3, 0.4], [0.0, 0.0, 1.0]),
            ([0.5, 0.4, 0.1], [0.0, 1.0, 0.0]),
        ];
        let mut whole = abc();
        let mut left = abc();
        let mut right = abc();
        for (i, (predicted, actual)) in pairs.iter().enumerate() {
            whole.process_result(predicted, actual).unwrap();
            let part = if i < 2 { &mut left } else { &mut right };
            part.process_result(predicted, actual).unwrap();
        }
        left.merge(&right).unwrap();
        assert_eq!(left.confusion_matrix(), whole.confusion_matrix());
        assert_eq!(left.evaluation_result().unwrap(), whole.evaluation_result().unwrap());
    }

    #[test]
    fn test_merge_after_finalize() {
        let mut left = abc();
        let mut right = abc();
        right.evaluation_result().unwrap();
        assert_eq!(left.merge(&right), Err(EvaluationError::Finalized));
    }
}
