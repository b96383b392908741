//! Runtime prior distributions attached to hyperparameters

use serde::{Deserialize, Serialize};

/// A prior distribution as understood by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimePrior {
    Gamma { concentration: f64, rate: f64 },
    HalfCauchy { scale: f64 },
    Normal { loc: f64, scale: f64 },
    HalfNormal { scale: f64 },
    LogNormal { loc: f64, scale: f64 },
    SmoothedBox { a: f64, b: f64, sigma: f64 },
}

impl RuntimePrior {
    pub fn name(&self) -> &'static str {
        match self {
            RuntimePrior::Gamma { .. } => "Gamma",
            RuntimePrior::HalfCauchy { .. } => "HalfCauchy",
            RuntimePrior::Normal { .. } => "Normal",
            RuntimePrior::HalfNormal { .. } => "HalfNormal",
            RuntimePrior::LogNormal { .. } => "LogNormal",
            RuntimePrior::SmoothedBox { .. } => "SmoothedBox",
        }
    }
}
