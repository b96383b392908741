//! Utility functions shared by kernels and priors

pub mod fraction;
pub mod validation;

pub use fraction::{parse_fraction, ratio_to_f64};
pub use validation::{finite_float, positive_float};
