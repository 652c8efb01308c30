use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::{Metric, Result, ResultsErr};

/// Everything a gradient-descent driver recorded for one algorithm over several runs.
///
/// Every sequence is nested the same way: the outer level lists the runs, the inner one the
/// optimization rounds of that run. Artificial descents don't carry the model parameters nor
/// the communication cost bookkeeping, so those fields may be left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescentResult {
    pub losses: Vec<Vec<f64>>,
    #[serde(default)]
    pub averaged_losses: Vec<Vec<f64>>,
    #[serde(default)]
    pub norm_error_feedback: Vec<Vec<f64>>,
    #[serde(default)]
    pub dist_to_model: Vec<Vec<f64>>,
    #[serde(default)]
    pub var_models: Vec<Vec<f64>>,
    #[serde(default)]
    pub artificial: bool,
    /// Parameters of the central model, per run and per round.
    #[serde(default)]
    pub model_params: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    pub theoretical_nb_bits: Vec<f64>,
    #[serde(default)]
    pub omega_c: f64,
}

impl DescentResult {
    /// Returns the recorded runs of the given metric.
    pub fn runs(&self, metric: Metric) -> &[Vec<f64>] {
        match metric {
            Metric::Loss => &self.losses,
            Metric::AveragedLoss => &self.averaged_losses,
            Metric::ErrorFeedback => &self.norm_error_feedback,
            Metric::DistanceToModel => &self.dist_to_model,
            Metric::VarModels => &self.var_models,
        }
    }

    /// Packs the runs of `metric` into a matrix with one row per run and one column per round.
    ///
    /// # Arguments
    /// * `name` - The algorithm this descent belongs to, used for error reporting.
    /// * `metric` - The sequence to pack.
    ///
    /// # Returns
    /// The run matrix, or `ResultsErr::RaggedRuns` if the runs don't all have the same length.
    pub(crate) fn run_matrix(&self, name: &str, metric: Metric) -> Result<Array2<f64>> {
        let runs = self.runs(metric);
        let expected = runs.first().map_or(0, Vec::len);

        if let Some((run, values)) = runs
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != expected)
        {
            return Err(ResultsErr::RaggedRuns {
                name: name.to_string(),
                metric,
                run,
                got: values.len(),
                expected,
            });
        }

        Ok(Array2::from_shape_fn((runs.len(), expected), |(r, c)| {
            runs[r][c]
        }))
    }

    /// Extracts the bookkeeping of a non-artificial descent.
    ///
    /// # Returns
    /// `None` for artificial descents, the final model, the bit counts and `omega_c` otherwise.
    /// Fails with `ResultsErr::MissingFinalModel` if a non-artificial descent has no parameters.
    pub(crate) fn bookkeeping(&self, name: &str) -> Result<Option<Bookkeeping>> {
        if self.artificial {
            return Ok(None);
        }

        let final_model = self
            .model_params
            .last()
            .and_then(|rounds| rounds.last())
            .ok_or_else(|| ResultsErr::MissingFinalModel {
                name: name.to_string(),
            })?;

        Ok(Some(Bookkeeping {
            final_model: Array1::from(final_model.clone()),
            theoretical_nb_bits: Array1::from(self.theoretical_nb_bits.clone()),
            omega_c: self.omega_c,
        }))
    }
}

/// Final model and communication cost of a non-artificial descent.
#[derive(Debug, Clone, PartialEq)]
pub struct Bookkeeping {
    final_model: Array1<f64>,
    theoretical_nb_bits: Array1<f64>,
    omega_c: f64,
}

impl Bookkeeping {
    /// Returns the parameters reached at the last round of the last run.
    pub fn final_model(&self) -> &Array1<f64> {
        &self.final_model
    }

    /// Returns the theoretical number of bits exchanged at each round.
    pub fn theoretical_nb_bits(&self) -> &Array1<f64> {
        &self.theoretical_nb_bits
    }

    pub fn omega_c(&self) -> f64 {
        self.omega_c
    }
}
