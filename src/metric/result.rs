use serde::{Deserialize, Serialize};

use crate::{
    error::{EvaluationError, Result},
    util::ratio_or_zero,
};

use super::confusion::ConfusionMatrix;

/// Counts and scores of one class, treating it as "positive" against all others.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassMetric {
    pub label: String,
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_negative: usize,
    /// Examples whose actual class is this one.
    pub support: usize,
    pub precision: f32,
    pub recall: f32,
    pub f1_score: f32,
}

/// Statistics snapshot of a finished confusion matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Share of examples on the diagonal; `None` when no example was processed.
    pub accuracy: Option<f32>,
    pub micro_precision: f32,
    pub micro_recall: f32,
    pub micro_f1_score: f32,
    pub macro_precision: f32,
    pub macro_recall: f32,
    pub macro_f1_score: f32,
    pub total: usize,
    pub metrics_by_class: Vec<ClassMetric>,
}

impl MetricResult {
    pub fn from_confusion_matrix(matrix: &ConfusionMatrix) -> Self {
        let class_number = matrix.class_number();
        let total = matrix.grand_total();

        let mut sum_tp = 0;
        let mut sum_fp = 0;
        let mut sum_fn = 0;
        let mut sum_precision = 0.0;
        let mut sum_recall = 0.0;
        let mut sum_f1 = 0.0;

        let mut metrics_by_class = Vec::with_capacity(class_number);
        for (class, label) in matrix.labels().iter().enumerate() {
            let (tp, row_total, column_total) = matrix.class_counts(class);
            let f_pos = column_total - tp;
            let f_neg = row_total - tp;
            let t_neg = total - tp - f_pos - f_neg;

            sum_tp += tp;
            sum_fp += f_pos;
            sum_fn += f_neg;

            let precision = ratio_or_zero(tp, tp + f_pos);
            let recall = ratio_or_zero(tp, tp + f_neg);
            let f1_score = calculate_f1_score(precision, recall);

            sum_precision += precision;
            sum_recall += recall;
            sum_f1 += f1_score;

            metrics_by_class.push(ClassMetric {
                label: label.clone(),
                true_positive: tp,
                false_positive: f_pos,
                false_negative: f_neg,
                true_negative: t_neg,
                support: tp + f_neg,
                precision,
                recall,
                f1_score,
            });
        }

        let accuracy = if total == 0 {
            None
        } else {
            Some(matrix.diagonal_total() as f32 / total as f32)
        };

        // Pooled counts: every off-diagonal example is one FP and one FN.
        let micro_precision = ratio_or_zero(sum_tp, sum_tp + sum_fp);
        let micro_recall = ratio_or_zero(sum_tp, sum_tp + sum_fn);

        MetricResult {
            accuracy,
            micro_precision,
            micro_recall,
            micro_f1_score: calculate_f1_score(micro_precision, micro_recall),
            macro_precision: sum_precision / class_number as f32,
            macro_recall: sum_recall / class_number as f32,
            macro_f1_score: sum_f1 / class_number as f32,
            total,
            metrics_by_class,
        }
    }

    /// Accuracy, or `DivisionUndefined` when the matrix was empty.
    pub fn accuracy_or_err(&self) -> Result<f32> {
        self.accuracy.ok_or_else(|| {
            EvaluationError::DivisionUndefined("accuracy of an empty confusion matrix".to_string())
        })
    }

    /// Metrics of the class named `label`, if present.
    pub fn class(&self, label: &str) -> Option<&ClassMetric> {
        self.metrics_by_class.iter().find(|m| m.label == label)
    }
}

pub fn calculate_f1_score(precision: f32, recall: f32) -> f32 {
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * (precision * recall) / (precision + recall)
}
