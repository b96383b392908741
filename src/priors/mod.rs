//! Prior distributions over kernel hyperparameters
//!
//! Kernel configs treat priors as opaque values implementing [`Prior`]; only
//! the runtime conversion looks at their parameters.

mod basic;

pub use basic::{
    GammaPrior, HalfCauchyPrior, HalfNormalPrior, LogNormalPrior, NormalPrior, SmoothedBoxPrior,
};

use crate::runtime::RuntimePrior;
use serde_json::Value;
use std::fmt;

/// Capability shared by every prior configuration.
pub trait Prior: fmt::Debug + Send + Sync {
    /// Name used as the `"type"` tag when serialized
    fn type_name(&self) -> &'static str;

    /// Translate into the runtime's prior object
    fn to_runtime(&self) -> RuntimePrior;

    /// Tagged JSON representation
    fn to_value(&self) -> Value;

    fn clone_box(&self) -> Box<dyn Prior>;
}

impl Clone for Box<dyn Prior> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn Prior {
    fn eq(&self, other: &Self) -> bool {
        self.to_value() == other.to_value()
    }
}
