use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::Metric;

/// Mean and standard deviation of one metric for one algorithm, round by round.
///
/// This is the shape handed over to plotting and reporting code, hence plain vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub name: String,
    pub metric: Metric,
    pub in_log: bool,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl MetricSummary {
    /// Creates a new `MetricSummary`.
    ///
    /// # Arguments
    /// * `name` - The algorithm the statistics belong to.
    /// * `metric` - The reduced metric.
    /// * `in_log` - Whether the statistics were computed in log scale.
    /// * `mean` - The mean across runs.
    /// * `std` - The standard deviation across runs.
    pub fn new(
        name: impl Into<String>,
        metric: Metric,
        in_log: bool,
        mean: Array1<f64>,
        std: Array1<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            metric,
            in_log,
            mean: mean.to_vec(),
            std: std.to_vec(),
        }
    }

    pub fn rounds(&self) -> usize {
        self.mean.len()
    }

    /// Returns `mean - std` at every round.
    pub fn lower(&self) -> Vec<f64> {
        self.mean.iter().zip(&self.std).map(|(m, s)| m - s).collect()
    }

    /// Returns `mean + std` at every round.
    pub fn upper(&self) -> Vec<f64> {
        self.mean.iter().zip(&self.std).map(|(m, s)| m + s).collect()
    }
}
