pub mod confusion;
pub mod output;
pub mod result;

pub use confusion::{ConfusionMatrix, ConfusionMatrixBuilder};
pub use output::{arg_max_class, ClassificationOutput};
pub use result::{calculate_f1_score, ClassMetric, MetricResult};
