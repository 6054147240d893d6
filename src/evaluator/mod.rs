pub mod binary;
pub mod cross_entropy;
pub mod multi_class;
mod tally;

use log::debug;

use crate::{
    error::{EvaluationError, Result},
    matrix::DenseMatrix,
    metric::{ConfusionMatrix, MetricResult},
};

pub use binary::{BinaryClass, BinaryClassEvaluator, DEFAULT_THRESHOLD};
pub use cross_entropy::{CrossEntropyEvaluator, ErrorMeasureResult};
pub use multi_class::MultiClassEvaluator;

/// Folds `(predicted, actual)` pairs into an accumulator and reduces it to one report.
pub trait Evaluator {
    type Output;

    fn process_result(&mut self, predicted: &[f32], actual: &[f32]) -> Result<()>;

    fn evaluation_result(&mut self) -> Result<Self::Output>;

    /// Feeds row `i` of `predictions` and `targets` as one pair, in row order.
    ///
    /// Stops at the first failing row and returns its error; rows before it stay
    /// counted. Returns the number of rows processed.
    fn process_batch(&mut self, predictions: &DenseMatrix, targets: &DenseMatrix) -> Result<usize> {
        if predictions.rows() != targets.rows() {
            return Err(EvaluationError::ConfigError(format!(
                "Batch has {} predicted rows but {} target rows",
                predictions.rows(),
                targets.rows()
            )));
        }
        if predictions.cols() != targets.cols() {
            return Err(EvaluationError::DimensionMismatch {
                predicted: predictions.cols(),
                actual: targets.cols(),
            });
        }
        for i in 0..predictions.rows() {
            self.process_result(&predictions.row(i), &targets.row(i))?;
        }
        Ok(predictions.rows())
    }
}

/// Confusion-matrix evaluators, selected once from the output width of the problem.
#[derive(Clone, Debug)]
pub enum MetricsEvaluator {
    Binary(BinaryClassEvaluator),
    MultiClass(MultiClassEvaluator),
}

impl MetricsEvaluator {
    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        match self {
            MetricsEvaluator::Binary(evaluator) => evaluator.confusion_matrix(),
            MetricsEvaluator::MultiClass(evaluator) => evaluator.confusion_matrix(),
        }
    }

    pub fn is_finalized(&self) -> bool {
        match self {
            MetricsEvaluator::Binary(evaluator) => evaluator.is_finalized(),
            MetricsEvaluator::MultiClass(evaluator) => evaluator.is_finalized(),
        }
    }

    /// Combines the counts of an evaluator built the same way over another partition of the data.
    pub fn merge(&mut self, other: &MetricsEvaluator) -> Result<()> {
        match (self, other) {
            (MetricsEvaluator::Binary(left), MetricsEvaluator::Binary(right)) => left.merge(right),
            (MetricsEvaluator::MultiClass(left), MetricsEvaluator::MultiClass(right)) => left.merge(right),
            _ => Err(EvaluationError::ConfigError(
                "Cannot merge a binary evaluator with a multi-class one".to_string(),
            )),
        }
    }
}

impl Evaluator for MetricsEvaluator {
    type Output = MetricResult;

    fn process_result(&mut self, predicted: &[f32], actual: &[f32]) -> Result<()> {
        match self {
            MetricsEvaluator::Binary(evaluator) => evaluator.process_result(predicted, actual),
            MetricsEvaluator::MultiClass(evaluator) => evaluator.process_result(predicted, actual),
        }
    }

    fn evaluation_result(&mut self) -> Result<MetricResult> {
        let result = match self {
            MetricsEvaluator::Binary(evaluator) => evaluator.evaluation_result(),
            MetricsEvaluator::MultiClass(evaluator) => evaluator.evaluation_result(),
        }?;
        debug!("Evaluation finalized: examples:{}, accuracy:{:?}", result.total, result.accuracy);
        Ok(result)
    }
}

/// Picks the evaluator for a problem: one output is always a binary decision at
/// threshold 0.5 over `{"No", "Yes"}`, wider outputs are multi-class over `all_labels`.
pub fn create_evaluator<S: AsRef<str>>(problem_output_width: usize, all_labels: &[S]) -> Result<MetricsEvaluator> {
    EvaluatorBuilder::new(problem_output_width).labels(all_labels).build()
}

pub struct EvaluatorBuilder {
    output_width: usize,
    labels: Vec<String>,
    threshold: Option<f32>,
}

impl EvaluatorBuilder {
    pub fn new(output_width: usize) -> Self {
        Self {
            output_width,
            labels: Vec::new(),
            threshold: None,
        }
    }

    /// Class labels of a multi-class problem. Ignored for single-output problems.
    pub fn labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.labels = labels.iter().map(|l| l.as_ref().to_string()).collect();
        self
    }

    /// Decision threshold of a single-output problem, 0.5 unless set.
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.output_width == 0 {
            return Err(EvaluationError::ConfigError(
                "Output width must be greater than zero".to_string(),
            ));
        }
        if self.output_width > 1 {
            if self.threshold.is_some() {
                return Err(EvaluationError::ConfigError(
                    "Threshold only applies to single-output problems".to_string(),
                ));
            }
            if self.labels.len() != self.output_width {
                return Err(EvaluationError::ConfigError(format!(
                    "Output width is {} but {} labels were given",
                    self.output_width,
                    self.labels.len()
                )));
            }
        }
        Ok(())
    }

    pub fn build(self) -> Result<MetricsEvaluator> {
        self.validate()?;
        if self.output_width == 1 {
            let threshold = self.threshold.unwrap_or(DEFAULT_THRESHOLD);
            debug!("Binary evaluator created: threshold:{}", threshold);
            return Ok(MetricsEvaluator::Binary(BinaryClassEvaluator::new(threshold)?));
        }
        debug!("Multi-class evaluator created: classes:{:?}", self.labels);
        Ok(MetricsEvaluator::MultiClass(MultiClassEvaluator::new(self.labels.as_slice())?))
    }
}
