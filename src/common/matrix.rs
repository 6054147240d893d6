use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use super::error::{EvaluationError, Result};

/// A dense batch of output vectors, one example per row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix {
    data: DMatrix<f32>,
}

impl DenseMatrix {
    /// Creates a new dense matrix with given rows, columns, and row major data.
    pub fn new(rows: usize, cols: usize, data: &[f32]) -> Self {
        Self {
            data: DMatrix::from_row_slice(rows, cols, data),
        }
    }

    /// Stacks equally sized vectors as the rows of a new matrix.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != cols) {
            return Err(EvaluationError::ConfigError(format!(
                "All rows must have {} values, found a row with {}",
                cols,
                bad.len()
            )));
        }
        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Ok(Self::new(rows.len(), cols, &flat))
    }

    /// Returns the number of rows in the matrix.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Returns the number of columns in the matrix.
    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Copies row `i` out as a vector. Storage is column major so rows are not contiguous.
    pub fn row(&self, i: usize) -> Vec<f32> {
        self.data.row(i).iter().copied().collect()
    }
}
