use log::warn;

use crate::{
    error::{EvaluationError, Result},
    metric::{ConfusionMatrix, MetricResult},
};

/// Confusion matrix plus the report snapshot taken when the evaluator is finalized.
#[derive(Clone, Debug)]
pub(crate) struct Tally {
    matrix: ConfusionMatrix,
    report: Option<MetricResult>,
}

impl Tally {
    pub(crate) fn new(matrix: ConfusionMatrix) -> Self {
        Self { matrix, report: None }
    }

    pub(crate) fn matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    pub(crate) fn is_finalized(&self) -> bool {
        self.report.is_some()
    }

    pub(crate) fn record(&mut self, actual_class: usize, predicted_class: usize) -> Result<()> {
        if self.is_finalized() {
            warn!(
                "Example ({}, {}) rejected: evaluator already finalized",
                actual_class, predicted_class
            );
            return Err(EvaluationError::Finalized);
        }
        self.matrix.increment(actual_class, predicted_class)
    }

    /// Reduces the matrix on the first call; later calls return the same snapshot.
    pub(crate) fn report(&mut self) -> Result<MetricResult> {
        if let Some(report) = &self.report {
            return Ok(report.clone());
        }
        let report = MetricResult::from_confusion_matrix(&self.matrix);
        self.report = Some(report.clone());
        Ok(report)
    }

    pub(crate) fn merge(&mut self, other: &Tally) -> Result<()> {
        if self.is_finalized() || other.is_finalized() {
            return Err(EvaluationError::Finalized);
        }
        self.matrix.merge(&other.matrix)
    }
}
