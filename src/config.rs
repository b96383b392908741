//! Settings and conversion configuration

use crate::error::{KernelError, Result};
use crate::runtime::tensor::{DType, DTYPE_FLOAT};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable switching runtime tensors to single precision
pub const SINGLE_PRECISION_ENV: &str = "KOLOSAL_USE_SINGLE_PRECISION";

/// Process-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Store runtime hyperparameters as 32-bit floats
    pub use_single_precision: bool,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(SINGLE_PRECISION_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        let use_single_precision = match value.map(|v| v.trim().to_ascii_lowercase()) {
            None => false,
            Some(v) => match v.as_str() {
                "1" | "true" | "yes" | "on" => true,
                "" | "0" | "false" | "no" | "off" => false,
                other => {
                    warn!(
                        variable = SINGLE_PRECISION_ENV,
                        value = %other,
                        "Unrecognized boolean value, falling back to double precision"
                    );
                    false
                }
            },
        };
        Self { use_single_precision }
    }

    /// Builder method to toggle single precision
    pub fn with_single_precision(mut self, enabled: bool) -> Self {
        self.use_single_precision = enabled;
        self
    }

    pub fn dtype(&self) -> DType {
        if self.use_single_precision {
            DType::Float32
        } else {
            DType::Float64
        }
    }
}

/// Shape and precision information passed to every kernel conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionContext {
    /// Number of input dimensions with their own lengthscale
    pub ard_num_dims: Option<usize>,

    /// Leading batch dimensions of every hyperparameter
    pub batch_shape: Vec<usize>,

    /// Input columns the kernel operates on
    pub active_dims: Option<Vec<usize>>,

    /// Precision of hyperparameter tensors
    pub dtype: DType,
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self {
            ard_num_dims: None,
            batch_shape: Vec::new(),
            active_dims: None,
            dtype: *DTYPE_FLOAT,
        }
    }
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the number of ARD dimensions
    pub fn with_ard_num_dims(mut self, n: usize) -> Self {
        self.ard_num_dims = Some(n);
        self
    }

    /// Builder method to set the batch shape
    pub fn with_batch_shape(mut self, shape: Vec<usize>) -> Self {
        self.batch_shape = shape;
        self
    }

    /// Builder method to restrict the kernel to some input columns
    pub fn with_active_dims(mut self, dims: Vec<usize>) -> Self {
        self.active_dims = Some(dims);
        self
    }

    /// Builder method to set the tensor precision
    pub fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = dtype;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.ard_num_dims == Some(0) {
            return Err(KernelError::constraint(
                "ard_num_dims",
                0,
                "must be at least 1",
            ));
        }
        if let (Some(ard), Some(active)) = (self.ard_num_dims, &self.active_dims) {
            if active.len() != ard {
                return Err(KernelError::constraint(
                    "active_dims",
                    format!("{active:?}"),
                    format!("length must match ard_num_dims = {ard}"),
                ));
            }
        }
        Ok(())
    }

    /// Shape of a lengthscale parameter: `[*batch_shape, 1, ard_num_dims or 1]`
    pub fn lengthscale_shape(&self) -> Vec<usize> {
        let mut shape = self.batch_shape.clone();
        shape.push(1);
        shape.push(self.ard_num_dims.unwrap_or(1));
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.use_single_precision);
        assert_eq!(settings.dtype(), DType::Float64);
    }

    #[test]
    fn test_settings_from_env_value() {
        assert!(Settings::from_env_value(Some("1")).use_single_precision);
        assert!(Settings::from_env_value(Some(" TRUE ")).use_single_precision);
        assert!(!Settings::from_env_value(Some("off")).use_single_precision);
        assert!(!Settings::from_env_value(Some("maybe")).use_single_precision);
        assert!(!Settings::from_env_value(None).use_single_precision);
    }

    #[test]
    fn test_builder() {
        let ctx = ConversionContext::new()
            .with_ard_num_dims(2)
            .with_batch_shape(vec![4])
            .with_active_dims(vec![0, 3])
            .with_dtype(DType::Float32);

        assert!(ctx.validate().is_ok());
        assert_eq!(ctx.lengthscale_shape(), vec![4, 1, 2]);
        assert_eq!(ctx.dtype, DType::Float32);
    }

    #[test]
    fn test_validate_rejects_bad_dims() {
        assert!(ConversionContext::new().with_ard_num_dims(0).validate().is_err());
        assert!(ConversionContext::new()
            .with_ard_num_dims(2)
            .with_active_dims(vec![0])
            .validate()
            .is_err());
    }
}
