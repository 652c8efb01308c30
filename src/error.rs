use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::Metric;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, ResultsErr>;

/// Errors raised while assembling or querying the results of several descents.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsErr {
    /// No descent was given to aggregate.
    NoDescents,
    /// Two descents were given under the same algorithm name.
    DuplicateName { name: String },
    /// A run does not have the same number of rounds as the first run of its algorithm.
    RaggedRuns {
        name: String,
        metric: Metric,
        run: usize,
        got: usize,
        expected: usize,
    },
    /// A non-artificial descent carries no model parameters to take the final model from.
    MissingFinalModel { name: String },
    /// The requested algorithm index does not exist.
    OutOfBounds { index: usize, len: usize },
}

impl Display for ResultsErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsErr::NoDescents => write!(f, "there are no descents to aggregate"),
            ResultsErr::DuplicateName { name } => {
                write!(f, "the algorithm {name} was given more than once")
            }
            ResultsErr::RaggedRuns {
                name,
                metric,
                run,
                got,
                expected,
            } => write!(
                f,
                "run {run} of {name} has {got} rounds of {metric}, expected {expected}"
            ),
            ResultsErr::MissingFinalModel { name } => write!(
                f,
                "the descent {name} is not artificial but has no model parameters"
            ),
            ResultsErr::OutOfBounds { index, len } => {
                write!(f, "algorithm index {index} is out of bounds for {len} algorithms")
            }
        }
    }
}

impl Error for ResultsErr {}
