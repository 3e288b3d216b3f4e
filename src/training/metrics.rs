//! Classification metrics.

use ndarray::ArrayView1;

/// Trait for evaluation metrics over predicted and true class indices.
pub trait MetricFn {
    /// Compute the metric. Predictions and targets are aligned by position.
    fn compute(&self, predictions: ArrayView1<'_, f32>, targets: ArrayView1<'_, f32>) -> f64;

    /// Whether larger values indicate a better model.
    fn higher_is_better(&self) -> bool;

    /// Short metric name.
    fn name(&self) -> &'static str;
}

/// Multiclass classification accuracy: proportion of exact class matches.
///
/// Higher is better. Returns 0.0 on empty input; returns 1.0 only if every
/// prediction matches its true label.
#[derive(Debug, Clone, Copy, Default)]
pub struct MulticlassAccuracy;

impl MetricFn for MulticlassAccuracy {
    fn compute(&self, predictions: ArrayView1<'_, f32>, targets: ArrayView1<'_, f32>) -> f64 {
        debug_assert_eq!(
            predictions.len(),
            targets.len(),
            "predictions must align with targets"
        );
        let n_rows = predictions.len();
        if n_rows == 0 {
            return 0.0;
        }

        let correct = predictions
            .iter()
            .zip(targets.iter())
            .filter(|(&p, &t)| (p - t).abs() < 0.5)
            .count();

        correct as f64 / n_rows as f64
    }

    fn higher_is_better(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "accuracy"
    }
}
