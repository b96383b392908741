//! Minimal tensor type for holding kernel hyperparameters

use crate::config::Settings;
use crate::error::{KernelError, Result};
use ndarray::{ArrayD, IxDyn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Floating-point precision of runtime tensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DType {
    Float32,
    #[default]
    Float64,
}

impl DType {
    /// Round `value` to this precision.
    pub fn cast(self, value: f64) -> f64 {
        match self {
            DType::Float32 => value as f32 as f64,
            DType::Float64 => value,
        }
    }
}

/// Process-wide float dtype, resolved once from the environment.
pub static DTYPE_FLOAT: Lazy<DType> = Lazy::new(|| Settings::from_env().dtype());

/// Dense tensor stored as `f64` and tagged with its logical precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    data: ArrayD<f64>,
    dtype: DType,
}

impl Tensor {
    /// Tensor of the given shape filled with `value`
    pub fn full(shape: &[usize], value: f64, dtype: DType) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(shape), dtype.cast(value)),
            dtype,
        }
    }

    fn from_array(data: ArrayD<f64>, dtype: DType) -> Self {
        Self {
            data: data.mapv(|v| dtype.cast(v)),
            dtype,
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// The single element of a one-element tensor
    pub fn item(&self) -> Option<f64> {
        if self.data.len() == 1 {
            self.data.iter().next().copied()
        } else {
            None
        }
    }

    /// Broadcast this tensor to `shape`, converting to `dtype`.
    pub fn broadcast_to(&self, shape: &[usize], dtype: DType) -> Result<Tensor> {
        let view = self
            .data
            .broadcast(IxDyn(shape))
            .ok_or_else(|| KernelError::ShapeError {
                expected: format!("{shape:?}"),
                actual: format!("{:?}", self.shape()),
            })?;
        Ok(Tensor::from_array(view.to_owned(), dtype))
    }
}

/// Build a 0-d tensor holding `value` at precision `dtype`.
pub fn tensor(value: f64, dtype: DType) -> Tensor {
    Tensor::full(&[], value, dtype)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tensor() {
        let t = tensor(2.0, DType::Float64);
        assert!(t.shape().is_empty());
        assert_eq!(t.item(), Some(2.0));
        assert_eq!(t.dtype(), DType::Float64);
    }

    #[test]
    fn test_float32_rounding() {
        let t = tensor(0.1, DType::Float32);
        assert_eq!(t.item(), Some(0.1_f32 as f64));
        assert_ne!(t.item(), Some(0.1));
    }

    #[test]
    fn test_broadcast_scalar() {
        let t = tensor(3.0, DType::Float64).broadcast_to(&[2, 1, 4], DType::Float64).unwrap();
        assert_eq!(t.shape(), &[2, 1, 4]);
        assert!(t.data().iter().all(|&v| v == 3.0));
        assert_eq!(t.item(), None);
    }

    #[test]
    fn test_broadcast_incompatible() {
        let t = Tensor::full(&[3], 1.0, DType::Float64);
        let err = t.broadcast_to(&[1, 2], DType::Float64).unwrap_err();
        assert_eq!(
            err,
            KernelError::ShapeError {
                expected: "[1, 2]".to_string(),
                actual: "[3]".to_string(),
            }
        );
    }

    #[test]
    fn test_broadcast_casts_dtype() {
        let t = tensor(0.1, DType::Float64).broadcast_to(&[2], DType::Float32).unwrap();
        assert_eq!(t.dtype(), DType::Float32);
        assert!(t.data().iter().all(|&v| v == 0.1_f32 as f64));
    }
}
