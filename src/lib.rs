mod descent;
mod error;
mod metric;
pub mod reduce;
mod results;
mod summary;

pub use descent::{Bookkeeping, DescentResult};
pub use error::{Result, ResultsErr};
pub use metric::Metric;
pub use reduce::Reduction;
pub use results::ResultsOfSeveralDescents;
pub use summary::MetricSummary;
