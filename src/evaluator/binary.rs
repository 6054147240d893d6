use serde::{Deserialize, Serialize};

use crate::{
    error::{EvaluationError, Result},
    metric::{ConfusionMatrix, MetricResult},
};

use super::{tally::Tally, Evaluator};

pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// The two classes of a single-output problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryClass {
    No = 0,
    Yes = 1,
}

impl BinaryClass {
    pub const LABELS: [&'static str; 2] = ["No", "Yes"];

    /// `Yes` when `value >= threshold`. NaN is `No`.
    pub fn from_score(value: f32, threshold: f32) -> Self {
        if value >= threshold {
            BinaryClass::Yes
        } else {
            BinaryClass::No
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }
}

/// Evaluator for problems with a single output neuron, thresholding `predicted[0]` and `actual[0]`.
#[derive(Clone, Debug)]
pub struct BinaryClassEvaluator {
    threshold: f32,
    tally: Tally,
}

impl BinaryClassEvaluator {
    pub fn new(threshold: f32) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(EvaluationError::ConfigError(format!(
                "Threshold must be a finite number, got {}",
                threshold
            )));
        }
        let matrix = ConfusionMatrix::build(&BinaryClass::LABELS, BinaryClass::LABELS.len())?;
        Ok(Self {
            threshold,
            tally: Tally::new(matrix),
        })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        self.tally.matrix()
    }

    pub fn is_finalized(&self) -> bool {
        self.tally.is_finalized()
    }

    /// Adds the counts of another binary evaluator with the same threshold.
    pub fn merge(&mut self, other: &BinaryClassEvaluator) -> Result<()> {
        if self.threshold != other.threshold {
            return Err(EvaluationError::ConfigError(format!(
                "Cannot merge evaluators with thresholds {} and {}",
                self.threshold, other.threshold
            )));
        }
        self.tally.merge(&other.tally)
    }

    fn first_value(values: &[f32]) -> Result<f32> {
        values.first().copied().ok_or_else(|| {
            EvaluationError::ConfigError("Binary evaluation needs at least one output value".to_string())
        })
    }
}

impl Evaluator for BinaryClassEvaluator {
    type Output = MetricResult;

    fn process_result(&mut self, predicted: &[f32], actual: &[f32]) -> Result<()> {
        let actual_class = BinaryClass::from_score(Self::first_value(actual)?, self.threshold);
        let predicted_class = BinaryClass::from_score(Self::first_value(predicted)?, self.threshold);
        self.tally.record(actual_class.index(), predicted_class.index())
    }

    fn evaluation_result(&mut self) -> Result<MetricResult> {
        self.tally.report()
    }
}
