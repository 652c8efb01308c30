use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// How the runs of an algorithm are collapsed into a single sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Elementwise mean across runs.
    Mean,
    /// Elementwise population standard deviation across runs.
    Std,
}

impl Reduction {
    fn apply(self, runs: ArrayView2<'_, f64>) -> Array1<f64> {
        match self {
            Reduction::Mean => runs
                .mean_axis(Axis(0))
                .unwrap_or_else(|| Array1::zeros(runs.ncols())),
            Reduction::Std => runs.std_axis(Axis(0), 0.0),
        }
    }
}

/// Reduces a run matrix (one row per run, one column per round) across its runs.
///
/// # Arguments
/// * `runs` - The runs to reduce.
/// * `in_log` - Whether to take the base-10 logarithm of every value before reducing.
/// * `reduction` - The statistic to compute.
///
/// # Returns
/// One value per round, or an empty sequence if there are no runs.
pub fn reduce(runs: ArrayView2<'_, f64>, in_log: bool, reduction: Reduction) -> Array1<f64> {
    if runs.nrows() == 0 {
        debug!("no runs to reduce, returning an empty sequence");
        return Array1::zeros(0);
    }

    if in_log {
        return reduction.apply(log10(runs).view());
    }

    reduction.apply(runs)
}

/// Takes the elementwise base-10 logarithm of `values`.
///
/// Non-positive values are not rejected, they map to `-inf` (zero) or `NaN` (negative).
pub fn log10(values: ArrayView2<'_, f64>) -> Array2<f64> {
    let non_positive = values.iter().filter(|v| **v <= 0.0).count();
    if non_positive > 0 {
        warn!("taking the log of {non_positive} non-positive value(s), expect NaN or -inf");
    }

    values.mapv(f64::log10)
}
