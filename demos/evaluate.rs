use std::env;

use classeval::{create_evaluator, CrossEntropyEvaluator, DenseMatrix, EvaluationError, Evaluator, MetricResult};
use env_logger::{Builder, Target};
use log::{error, info};

// Plays the part of the reporting side: feeds a few hand-written network outputs
// through each evaluator and prints what comes back.
fn main() {
    initialize_logger();

    if let Err(e) = run() {
        error!("Evaluation failed: {}", e);
    }
}

fn run() -> Result<(), EvaluationError> {
    // Single output neuron: thresholded at 0.5.
    let mut binary = create_evaluator(1, &["spam"])?;
    let predicted = DenseMatrix::new(4, 1, &[0.91, 0.12, 0.64, 0.38]);
    let actual = DenseMatrix::new(4, 1, &[1.0, 0.0, 0.0, 1.0]);
    binary.process_batch(&predicted, &actual)?;
    report("binary", &binary.evaluation_result()?);

    // One output per class: arg-max on both sides.
    let labels = ["setosa", "versicolor", "virginica"];
    let mut multi = create_evaluator(labels.len(), &labels)?;
    let predicted = DenseMatrix::from_rows(&[
        vec![0.85, 0.10, 0.05],
        vec![0.05, 0.70, 0.25],
        vec![0.10, 0.45, 0.45],
        vec![0.02, 0.18, 0.80],
    ])?;
    let actual = DenseMatrix::from_rows(&[
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.0, 0.0, 1.0],
    ])?;
    multi.process_batch(&predicted, &actual)?;
    report("multi-class", &multi.evaluation_result()?);

    // Same outputs scored as a loss.
    let mut cross_entropy = CrossEntropyEvaluator::new();
    cross_entropy.process_batch(&predicted, &actual)?;
    let loss = cross_entropy.evaluation_result()?;
    info!("cross-entropy: examples:{}, average error:{:.4}", loss.examples, loss.average_error);

    Ok(())
}

fn report(name: &str, result: &MetricResult) {
    match result.accuracy {
        Some(accuracy) => info!("{}: examples:{}, accuracy:{:.2}%", name, result.total, accuracy * 100.0),
        None => info!("{}: no examples, accuracy undefined", name),
    }
    info!(
        "{}: micro F1:{:.4}, macro F1:{:.4}",
        name, result.micro_f1_score, result.macro_f1_score
    );
    for metric in &result.metrics_by_class {
        info!(
            "    {:<12} Precision:{:.4}    Recall:{:.4}    F1 Score:{:.4}",
            metric.label, metric.precision, metric.recall, metric.f1_score
        );
    }
}

fn initialize_logger() {
    // Check if the "LOG" environment variable is set
    let log_level = env::var("LOG").unwrap_or_else(|_| "info".to_string());

    Builder::new()
        .target(Target::Stderr)
        .parse_filters(&log_level)
        .init();
}
