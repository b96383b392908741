//! Runtime kernel objects
//!
//! These hold hyperparameter tensors and their priors in the layout a GP
//! model expects. They carry no covariance evaluation.

use super::priors::RuntimePrior;
use super::tensor::Tensor;
use crate::config::ConversionContext;
use crate::error::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// Value of a positive hyperparameter whose raw parameter is zero, i.e. softplus(0).
pub const DEFAULT_POSITIVE_VALUE: f64 = std::f64::consts::LN_2;

/// Smoothness values the runtime Matern kernel supports
pub const SUPPORTED_NU: [f64; 3] = [0.5, 1.5, 2.5];

/// Executable kernel representation produced from a kernel config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimeKernel {
    Matern(MaternRuntime),
    Scale(ScaleRuntime),
}

impl RuntimeKernel {
    pub fn name(&self) -> &'static str {
        match self {
            RuntimeKernel::Matern(_) => "MaternKernel",
            RuntimeKernel::Scale(_) => "ScaleKernel",
        }
    }

    pub fn as_matern(&self) -> Option<&MaternRuntime> {
        match self {
            RuntimeKernel::Matern(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_matern_mut(&mut self) -> Option<&mut MaternRuntime> {
        match self {
            RuntimeKernel::Matern(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_scale(&self) -> Option<&ScaleRuntime> {
        match self {
            RuntimeKernel::Scale(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_scale_mut(&mut self) -> Option<&mut ScaleRuntime> {
        match self {
            RuntimeKernel::Scale(k) => Some(k),
            _ => None,
        }
    }
}

/// Matern kernel with a (possibly ARD) lengthscale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaternRuntime {
    nu: f64,
    lengthscale: Tensor,
    lengthscale_prior: Option<RuntimePrior>,
    ard_num_dims: Option<usize>,
    batch_shape: Vec<usize>,
    active_dims: Option<Vec<usize>>,
}

impl MaternRuntime {
    /// Lengthscale has shape `[*batch_shape, 1, ard_num_dims or 1]`.
    pub fn new(
        nu: f64,
        lengthscale_prior: Option<RuntimePrior>,
        ctx: &ConversionContext,
    ) -> Result<Self> {
        if !SUPPORTED_NU.contains(&nu) {
            return Err(KernelError::constraint(
                "nu",
                nu,
                "nu expected to be 0.5, 1.5, or 2.5",
            ));
        }
        ctx.validate()?;

        Ok(Self {
            nu,
            lengthscale: Tensor::full(&ctx.lengthscale_shape(), DEFAULT_POSITIVE_VALUE, ctx.dtype),
            lengthscale_prior,
            ard_num_dims: ctx.ard_num_dims,
            batch_shape: ctx.batch_shape.clone(),
            active_dims: ctx.active_dims.clone(),
        })
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    pub fn lengthscale(&self) -> &Tensor {
        &self.lengthscale
    }

    pub fn lengthscale_prior(&self) -> Option<&RuntimePrior> {
        self.lengthscale_prior.as_ref()
    }

    pub fn ard_num_dims(&self) -> Option<usize> {
        self.ard_num_dims
    }

    pub fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }

    pub fn active_dims(&self) -> Option<&[usize]> {
        self.active_dims.as_deref()
    }

    /// Overwrite the lengthscale, broadcasting `value` over its shape.
    pub fn set_lengthscale(&mut self, value: &Tensor) -> Result<()> {
        self.lengthscale = set_positive("lengthscale", &self.lengthscale, value)?;
        Ok(())
    }
}

/// Kernel decorated with an output scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleRuntime {
    base_kernel: Box<RuntimeKernel>,
    outputscale: Tensor,
    outputscale_prior: Option<RuntimePrior>,
    batch_shape: Vec<usize>,
}

impl ScaleRuntime {
    /// Outputscale has shape `batch_shape`; a scalar when the batch shape is empty.
    pub fn new(
        base_kernel: RuntimeKernel,
        outputscale_prior: Option<RuntimePrior>,
        ctx: &ConversionContext,
    ) -> Result<Self> {
        ctx.validate()?;

        Ok(Self {
            base_kernel: Box::new(base_kernel),
            outputscale: Tensor::full(&ctx.batch_shape, DEFAULT_POSITIVE_VALUE, ctx.dtype),
            outputscale_prior,
            batch_shape: ctx.batch_shape.clone(),
        })
    }

    pub fn base_kernel(&self) -> &RuntimeKernel {
        &self.base_kernel
    }

    pub fn outputscale(&self) -> &Tensor {
        &self.outputscale
    }

    pub fn outputscale_prior(&self) -> Option<&RuntimePrior> {
        self.outputscale_prior.as_ref()
    }

    pub fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }

    /// Overwrite the outputscale, broadcasting `value` over its shape.
    pub fn set_outputscale(&mut self, value: &Tensor) -> Result<()> {
        self.outputscale = set_positive("outputscale", &self.outputscale, value)?;
        Ok(())
    }
}

/// Broadcast `value` onto `current`'s shape and dtype, enforcing positivity.
fn set_positive(name: &str, current: &Tensor, value: &Tensor) -> Result<Tensor> {
    if let Some(bad) = value.data().iter().find(|v| !(v.is_finite() && **v > 0.0)) {
        return Err(KernelError::constraint(
            name,
            bad,
            "must be positive and finite",
        ));
    }
    value.broadcast_to(current.shape(), current.dtype())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::tensor::{tensor, DType};

    fn ctx() -> ConversionContext {
        ConversionContext::new().with_dtype(DType::Float64)
    }

    #[test]
    fn test_matern_defaults() {
        let k = MaternRuntime::new(2.5, None, &ctx()).unwrap();
        assert_eq!(k.lengthscale().shape(), &[1, 1]);
        assert!(k.lengthscale().data().iter().all(|&v| v == DEFAULT_POSITIVE_VALUE));
        assert!(k.lengthscale_prior().is_none());
    }

    #[test]
    fn test_matern_rejects_unsupported_nu() {
        let err = MaternRuntime::new(3.5, None, &ctx()).unwrap_err();
        assert!(matches!(err, KernelError::ConstraintViolation { .. }));
    }

    #[test]
    fn test_ard_lengthscale_shape() {
        let ctx = ctx().with_ard_num_dims(3).with_batch_shape(vec![2]);
        let mut k = MaternRuntime::new(1.5, None, &ctx).unwrap();
        assert_eq!(k.lengthscale().shape(), &[2, 1, 3]);

        k.set_lengthscale(&tensor(2.0, DType::Float64)).unwrap();
        assert_eq!(k.lengthscale().shape(), &[2, 1, 3]);
        assert!(k.lengthscale().data().iter().all(|&v| v == 2.0));
    }

    #[test]
    fn test_set_lengthscale_rejects_non_positive() {
        let mut k = MaternRuntime::new(0.5, None, &ctx()).unwrap();
        for bad in [0.0, -1.0, f64::NAN] {
            assert!(k.set_lengthscale(&tensor(bad, DType::Float64)).is_err());
        }
        assert_eq!(k.lengthscale().item(), Some(DEFAULT_POSITIVE_VALUE));
    }

    #[test]
    fn test_scale_wraps_base() {
        let base = RuntimeKernel::Matern(MaternRuntime::new(2.5, None, &ctx()).unwrap());
        let mut scaled = ScaleRuntime::new(base.clone(), None, &ctx()).unwrap();
        assert_eq!(scaled.base_kernel(), &base);
        assert!(scaled.outputscale().shape().is_empty());
        assert_eq!(scaled.outputscale().item(), Some(DEFAULT_POSITIVE_VALUE));

        scaled.set_outputscale(&tensor(0.5, DType::Float64)).unwrap();
        assert_eq!(scaled.outputscale().item(), Some(0.5));
    }
}
