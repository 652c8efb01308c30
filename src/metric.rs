use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A sequence tracked once per round in every run of a descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Loss,
    /// Loss of the running average of the model parameters.
    AveragedLoss,
    ErrorFeedback,
    /// Distance between the central model and the remote ones.
    DistanceToModel,
    VarModels,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Loss,
        Metric::AveragedLoss,
        Metric::ErrorFeedback,
        Metric::DistanceToModel,
        Metric::VarModels,
    ];

    /// Returns the loss metric matching the `averaged` flag.
    pub fn loss(averaged: bool) -> Self {
        if averaged {
            Metric::AveragedLoss
        } else {
            Metric::Loss
        }
    }

    /// Whether values of this metric are compared against an objective value.
    pub fn is_loss(&self) -> bool {
        matches!(self, Metric::Loss | Metric::AveragedLoss)
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Metric::Loss => "losses",
            Metric::AveragedLoss => "averaged losses",
            Metric::ErrorFeedback => "error feedback norms",
            Metric::DistanceToModel => "distances to model",
            Metric::VarModels => "model variances",
        };

        write!(f, "{s}")
    }
}
