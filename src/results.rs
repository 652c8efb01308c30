use log::{debug, info, warn};
use ndarray::{Array1, Array2};

use crate::{
    descent::Bookkeeping,
    reduce::{reduce, Reduction},
    DescentResult, Metric, MetricSummary, Result, ResultsErr,
};

/// Results of several gradient descents, each one run several times.
///
/// Every metric is kept as one run matrix per algorithm, in the order the algorithms were
/// given: `all_losses[k]` has one row per run of the k-th algorithm and one column per round.
/// The accessors reduce those matrices across runs, in linear or base-10 log scale.
#[derive(Debug, Clone)]
pub struct ResultsOfSeveralDescents {
    names: Vec<String>,
    nb_devices_for_the_run: usize,
    all_losses: Vec<Array2<f64>>,
    all_losses_averaged: Vec<Array2<f64>>,
    norm_error_feedback: Vec<Array2<f64>>,
    distance_to_model: Vec<Array2<f64>>,
    var_models: Vec<Array2<f64>>,
    bookkeeping: Vec<Option<Bookkeeping>>,
}

impl ResultsOfSeveralDescents {
    /// Creates a new `ResultsOfSeveralDescents`.
    ///
    /// # Arguments
    /// * `all_descent` - The descents to aggregate, keyed by algorithm name. Their iteration
    ///   order is the order of every accessor's output.
    /// * `nb_devices_for_the_run` - The number of devices the descents were run with.
    ///
    /// # Returns
    /// The aggregated results, or an error if there are no descents, if a name is repeated,
    /// if the runs of a metric have different lengths or if a non-artificial descent has no
    /// final model.
    pub fn new<I, S>(all_descent: I, nb_devices_for_the_run: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (S, DescentResult)>,
        S: Into<String>,
    {
        let mut results = Self {
            names: Vec::new(),
            nb_devices_for_the_run,
            all_losses: Vec::new(),
            all_losses_averaged: Vec::new(),
            norm_error_feedback: Vec::new(),
            distance_to_model: Vec::new(),
            var_models: Vec::new(),
            bookkeeping: Vec::new(),
        };

        for (name, descent) in all_descent {
            let name = name.into();
            if results.names.contains(&name) {
                return Err(ResultsErr::DuplicateName { name });
            }

            results
                .all_losses
                .push(descent.run_matrix(&name, Metric::Loss)?);
            results
                .all_losses_averaged
                .push(descent.run_matrix(&name, Metric::AveragedLoss)?);
            results
                .norm_error_feedback
                .push(descent.run_matrix(&name, Metric::ErrorFeedback)?);
            results
                .distance_to_model
                .push(descent.run_matrix(&name, Metric::DistanceToModel)?);
            results
                .var_models
                .push(descent.run_matrix(&name, Metric::VarModels)?);
            results.bookkeeping.push(descent.bookkeeping(&name)?);

            debug!(
                "collected {} run(s) of {name}, artificial: {}",
                descent.losses.len(),
                descent.artificial
            );
            results.names.push(name);
        }

        let len = results.names.len();
        if len == 0 {
            return Err(ResultsErr::NoDescents);
        }

        let artificial = results.bookkeeping.iter().filter(|b| b.is_none()).count();
        if artificial != 0 && artificial != len {
            warn!(
                "{artificial} of {len} descents are artificial, bookkeeping is only available for the others"
            );
        }

        info!(
            "aggregated the results of {len} algorithm(s) run over {} device(s)",
            results.nb_devices_for_the_run
        );
        Ok(results)
    }

    /// Returns the algorithm names, in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn nb_devices_for_the_run(&self) -> usize {
        self.nb_devices_for_the_run
    }

    /// Returns the number of aggregated algorithms.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the position of the algorithm called `name`, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns the run matrices of `metric`, one per algorithm.
    pub fn runs(&self, metric: Metric) -> &[Array2<f64>] {
        match metric {
            Metric::Loss => &self.all_losses,
            Metric::AveragedLoss => &self.all_losses_averaged,
            Metric::ErrorFeedback => &self.norm_error_feedback,
            Metric::DistanceToModel => &self.distance_to_model,
            Metric::VarModels => &self.var_models,
        }
    }

    /// Returns the unreduced (averaged) loss runs of the `i`-th algorithm.
    pub fn get_losses_i(&self, i: usize, averaged: bool) -> Result<&Array2<f64>> {
        self.runs(Metric::loss(averaged))
            .get(i)
            .ok_or(ResultsErr::OutOfBounds {
                index: i,
                len: self.len(),
            })
    }

    /// Returns the mean across runs of the gap between the losses and `obj`, per algorithm.
    ///
    /// # Arguments
    /// * `obj` - The objective loss to compare against.
    /// * `averaged` - Whether to use the losses of the averaged model.
    /// * `in_log` - Whether to take the log of the gaps before averaging. Gaps must be strictly
    ///   positive, otherwise the output holds `NaN` or `-inf`.
    pub fn get_loss(&self, obj: f64, averaged: bool, in_log: bool) -> Vec<Array1<f64>> {
        self.loss_gaps(obj, averaged, in_log, Reduction::Mean)
    }

    /// Returns the standard deviation across runs of the gap between the losses and `obj`.
    ///
    /// Same arguments as [`Self::get_loss`].
    pub fn get_std(&self, obj: f64, averaged: bool, in_log: bool) -> Vec<Array1<f64>> {
        self.loss_gaps(obj, averaged, in_log, Reduction::Std)
    }

    fn loss_gaps(
        &self,
        obj: f64,
        averaged: bool,
        in_log: bool,
        reduction: Reduction,
    ) -> Vec<Array1<f64>> {
        self.runs(Metric::loss(averaged))
            .iter()
            .map(|losses| reduce(losses.mapv(|l| l - obj).view(), in_log, reduction))
            .collect()
    }

    /// Reduces every run matrix of `seq_values` to its mean across runs.
    pub fn getter(seq_values: &[Array2<f64>], in_log: bool) -> Vec<Array1<f64>> {
        reduce_all(seq_values, in_log, Reduction::Mean)
    }

    /// Reduces every run matrix of `seq_values` to its standard deviation across runs.
    pub fn getter_std(seq_values: &[Array2<f64>], in_log: bool) -> Vec<Array1<f64>> {
        reduce_all(seq_values, in_log, Reduction::Std)
    }

    /// Returns the mean error feedback norm of each algorithm.
    pub fn get_error_feedback(&self, in_log: bool) -> Vec<Array1<f64>> {
        Self::getter(&self.norm_error_feedback, in_log)
    }

    pub fn get_error_feedback_std(&self, in_log: bool) -> Vec<Array1<f64>> {
        Self::getter_std(&self.norm_error_feedback, in_log)
    }

    /// Returns the mean distance between the central model and the remote ones.
    pub fn get_distance_to_model(&self, in_log: bool) -> Vec<Array1<f64>> {
        Self::getter(&self.distance_to_model, in_log)
    }

    /// Returns the standard deviation of the distance between the central model and the
    /// remote ones.
    ///
    /// Earlier versions of this analysis reduced the error feedback norms here. This one
    /// reduces the distances to model, matching [`Self::get_distance_to_model`].
    pub fn get_distance_to_model_std(&self, in_log: bool) -> Vec<Array1<f64>> {
        Self::getter_std(&self.distance_to_model, in_log)
    }

    /// Returns the mean variance of the remote models.
    pub fn get_var_models(&self, in_log: bool) -> Vec<Array1<f64>> {
        Self::getter(&self.var_models, in_log)
    }

    pub fn get_var_models_std(&self, in_log: bool) -> Vec<Array1<f64>> {
        Self::getter_std(&self.var_models, in_log)
    }

    /// Returns the mean across runs of any metric. Losses are not shifted by an objective.
    pub fn mean(&self, metric: Metric, in_log: bool) -> Vec<Array1<f64>> {
        Self::getter(self.runs(metric), in_log)
    }

    /// Returns the standard deviation across runs of any metric.
    pub fn std(&self, metric: Metric, in_log: bool) -> Vec<Array1<f64>> {
        Self::getter_std(self.runs(metric), in_log)
    }

    /// Builds a mean/std summary of `metric` for every algorithm.
    ///
    /// # Arguments
    /// * `metric` - The metric to summarize.
    /// * `obj` - The objective loss, only subtracted from loss metrics.
    /// * `in_log` - Whether to compute the statistics in log scale.
    pub fn summarize(&self, metric: Metric, obj: f64, in_log: bool) -> Vec<MetricSummary> {
        let (means, stds) = if metric.is_loss() {
            let averaged = metric == Metric::AveragedLoss;
            (
                self.get_loss(obj, averaged, in_log),
                self.get_std(obj, averaged, in_log),
            )
        } else {
            (self.mean(metric, in_log), self.std(metric, in_log))
        };

        self.names
            .iter()
            .zip(means.into_iter().zip(stds))
            .map(|(name, (mean, std))| MetricSummary::new(name.as_str(), metric, in_log, mean, std))
            .collect()
    }

    /// Returns the bookkeeping of the `i`-th algorithm, `None` if its descent was artificial.
    pub fn bookkeeping(&self, i: usize) -> Result<Option<&Bookkeeping>> {
        self.bookkeeping
            .get(i)
            .map(Option::as_ref)
            .ok_or(ResultsErr::OutOfBounds {
                index: i,
                len: self.len(),
            })
    }

    /// Returns the final model of each algorithm.
    pub fn all_final_model(&self) -> Vec<Option<&Array1<f64>>> {
        self.bookkeeping
            .iter()
            .map(|b| b.as_ref().map(Bookkeeping::final_model))
            .collect()
    }

    /// Returns the theoretical number of bits exchanged per round by each algorithm.
    pub fn x_number_of_bits(&self) -> Vec<Option<&Array1<f64>>> {
        self.bookkeeping
            .iter()
            .map(|b| b.as_ref().map(Bookkeeping::theoretical_nb_bits))
            .collect()
    }

    pub fn omega_c(&self) -> Vec<Option<f64>> {
        self.bookkeeping
            .iter()
            .map(|b| b.as_ref().map(Bookkeeping::omega_c))
            .collect()
    }
}

fn reduce_all(seq_values: &[Array2<f64>], in_log: bool, reduction: Reduction) -> Vec<Array1<f64>> {
    seq_values
        .iter()
        .map(|runs| reduce(runs.view(), in_log, reduction))
        .collect()
}
