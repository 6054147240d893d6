use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{EvaluationError, Result};

/// Square table of class counts indexed `[actual][predicted]`.
///
/// Counts only grow while a pass is running. A matrix belongs to one evaluation
/// run; build a fresh one for the next run.
///
/// Deserializing runs the same checks as [`ConfusionMatrixBuilder`] plus a shape
/// check on the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfusionMatrixData")]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    class_number: usize,
    grid: DMatrix<usize>,
}

impl ConfusionMatrix {
    /// Builds a zeroed matrix over `labels`. Shorthand for [`ConfusionMatrixBuilder`].
    pub fn build<S: AsRef<str>>(labels: &[S], class_number: usize) -> Result<Self> {
        ConfusionMatrixBuilder::new()
            .labels(labels)
            .class_number(class_number)
            .build()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn class_number(&self) -> usize {
        self.class_number
    }

    /// Adds one example to cell `(actual_class, predicted_class)`.
    pub fn increment(&mut self, actual_class: usize, predicted_class: usize) -> Result<()> {
        self.check_cell(actual_class, predicted_class)?;
        self.grid[(actual_class, predicted_class)] += 1;
        Ok(())
    }

    pub fn cell_count(&self, actual_class: usize, predicted_class: usize) -> Result<usize> {
        self.check_cell(actual_class, predicted_class)?;
        Ok(self.grid[(actual_class, predicted_class)])
    }

    /// Number of examples whose actual class is `actual_class`.
    pub fn row_total(&self, actual_class: usize) -> Result<usize> {
        self.check_cell(actual_class, 0)?;
        Ok(self.grid.row(actual_class).iter().sum())
    }

    /// Number of examples predicted as `predicted_class`.
    pub fn column_total(&self, predicted_class: usize) -> Result<usize> {
        self.check_cell(0, predicted_class)?;
        Ok(self.grid.column(predicted_class).iter().sum())
    }

    pub fn grand_total(&self) -> usize {
        self.grid.iter().sum()
    }

    /// Diagonal cell, row total and column total of `class`. Callers keep `class < class_number`.
    pub(crate) fn class_counts(&self, class: usize) -> (usize, usize, usize) {
        (
            self.grid[(class, class)],
            self.grid.row(class).iter().sum(),
            self.grid.column(class).iter().sum(),
        )
    }

    /// Sum of the diagonal, i.e. correctly classified examples.
    pub fn diagonal_total(&self) -> usize {
        (0..self.class_number).map(|c| self.grid[(c, c)]).sum()
    }

    /// Adds the counts of `other` cell by cell.
    ///
    /// Both matrices must share class number and labels. Merging is associative
    /// and commutative, so a stream split into partitions can be evaluated
    /// separately and combined afterwards.
    pub fn merge(&mut self, other: &ConfusionMatrix) -> Result<()> {
        if self.class_number != other.class_number || self.labels != other.labels {
            return Err(EvaluationError::ConfigError(format!(
                "Cannot merge a {}x{} matrix labelled {:?} into a {}x{} matrix labelled {:?}",
                other.class_number, other.class_number, other.labels, self.class_number, self.class_number, self.labels
            )));
        }
        self.grid += &other.grid;
        Ok(())
    }

    fn check_cell(&self, actual_class: usize, predicted_class: usize) -> Result<()> {
        if actual_class >= self.class_number || predicted_class >= self.class_number {
            return Err(EvaluationError::IndexOutOfRange {
                actual: actual_class,
                predicted: predicted_class,
                class_number: self.class_number,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct ConfusionMatrixData {
    labels: Vec<String>,
    class_number: usize,
    grid: DMatrix<usize>,
}

impl TryFrom<ConfusionMatrixData> for ConfusionMatrix {
    type Error = EvaluationError;

    fn try_from(data: ConfusionMatrixData) -> Result<Self> {
        ConfusionMatrixBuilder::new()
            .labels(&data.labels)
            .class_number(data.class_number)
            .validate(data.class_number)?;
        if data.grid.nrows() != data.class_number || data.grid.ncols() != data.class_number {
            return Err(EvaluationError::ConfigError(format!(
                "Grid is {}x{} but class number is {}",
                data.grid.nrows(),
                data.grid.ncols(),
                data.class_number
            )));
        }
        Ok(ConfusionMatrix {
            labels: data.labels,
            class_number: data.class_number,
            grid: data.grid,
        })
    }
}

pub struct ConfusionMatrixBuilder {
    labels: Vec<String>,
    class_number: Option<usize>,
}

impl ConfusionMatrixBuilder {
    /// Creates a builder with no labels. The class number defaults to the label count.
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            class_number: None,
        }
    }

    /// Ordered class labels, one per row/column.
    pub fn labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.labels = labels.iter().map(|l| l.as_ref().to_string()).collect();
        self
    }

    pub fn class_number(mut self, class_number: usize) -> Self {
        self.class_number = Some(class_number);
        self
    }

    fn validate(&self, class_number: usize) -> Result<()> {
        if class_number < 2 {
            return Err(EvaluationError::ConfigError(format!(
                "Class number must be at least 2, got {}",
                class_number
            )));
        }
        if self.labels.len() != class_number {
            return Err(EvaluationError::ConfigError(format!(
                "Expected {} labels, got {}",
                class_number,
                self.labels.len()
            )));
        }
        Ok(())
    }

    pub fn build(self) -> Result<ConfusionMatrix> {
        let class_number = self.class_number.unwrap_or(self.labels.len());
        self.validate(class_number)?;
        Ok(ConfusionMatrix {
            labels: self.labels,
            class_number,
            grid: DMatrix::zeros(class_number, class_number),
        })
    }
}

impl Default for ConfusionMatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}
