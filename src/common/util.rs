use super::error::{EvaluationError, Result};

/// Index of the largest value, the first one winning on ties. NaN never wins a comparison.
pub(crate) fn find_max_index(values: &[f32]) -> usize {
    let mut max_idx = 0;
    let mut max_val = match values.first() {
        Some(&v) => v,
        None => return 0,
    };

    for (j, &val) in values.iter().enumerate().skip(1) {
        if val > max_val || (max_val.is_nan() && !val.is_nan()) {
            max_val = val;
            max_idx = j;
        }
    }

    max_idx
}

/// Rejects a predicted/actual pair whose lengths differ.
pub(crate) fn ensure_same_len(predicted: &[f32], actual: &[f32]) -> Result<()> {
    if predicted.len() != actual.len() {
        return Err(EvaluationError::DimensionMismatch {
            predicted: predicted.len(),
            actual: actual.len(),
        });
    }
    Ok(())
}

/// Ratio helper returning 0 when the denominator is 0.
pub(crate) fn ratio_or_zero(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f32 / denominator as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_max_index() {
        assert_eq!(find_max_index(&[0.1, 0.9, 0.3]), 1);
        assert_eq!(find_max_index(&[0.5, 0.5]), 0);
        assert_eq!(find_max_index(&[-2.0, -1.0, -3.0]), 1);
    }

    #[test]
    fn test_find_max_index_skips_nan() {
        assert_eq!(find_max_index(&[f32::NAN, 0.2, 0.4]), 2);
        assert_eq!(find_max_index(&[0.4, f32::NAN, 0.2]), 0);
    }

    #[test]
    fn test_ensure_same_len() {
        assert!(ensure_same_len(&[0.1, 0.2], &[1.0, 0.0]).is_ok());
        assert_eq!(
            ensure_same_len(&[0.1], &[1.0, 0.0]),
            Err(EvaluationError::DimensionMismatch { predicted: 1, actual: 2 })
        );
    }

    #[test]
    fn test_ratio_or_zero() {
        assert_eq!(ratio_or_zero(3, 0), 0.0);
        assert!((ratio_or_zero(1, 4) - 0.25).abs() < 1e-6);
    }
}
