//! Collection of kernels

use super::base::Kernel;
use crate::config::ConversionContext;
use crate::error::{KernelError, Result};
use crate::priors::Prior;
use crate::runtime::{tensor, MaternRuntime, RuntimeKernel, ScaleRuntime};
use crate::utils::{finite_float, parse_fraction, ratio_to_f64};
use num_rational::Ratio;
use serde_json::{json, Map, Value};
use tracing::trace;

/// Smoothness values a [`MaternKernel`] accepts
pub const ALLOWED_NU: [f64; 3] = [0.5, 1.5, 2.5];

/// Smoothness used when none is given
pub const DEFAULT_NU: f64 = 2.5;

/// Any accepted spelling of a Matern smoothness value
#[derive(Debug, Clone, PartialEq)]
pub enum Smoothness {
    Float(f64),
    /// Decimal (`"1.5"`) or fraction (`"3/2"`) text
    Text(String),
    Fraction(Ratio<i64>),
}

impl Smoothness {
    /// Normalize to a float. Text that is not a fraction is an `InvalidInput`.
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Smoothness::Float(v) => Ok(*v),
            Smoothness::Text(text) => parse_fraction(text),
            Smoothness::Fraction(ratio) => Ok(ratio_to_f64(ratio)),
        }
    }
}

impl From<f64> for Smoothness {
    fn from(value: f64) -> Self {
        Smoothness::Float(value)
    }
}

impl From<&str> for Smoothness {
    fn from(value: &str) -> Self {
        Smoothness::Text(value.to_string())
    }
}

impl From<String> for Smoothness {
    fn from(value: String) -> Self {
        Smoothness::Text(value)
    }
}

impl From<Ratio<i64>> for Smoothness {
    fn from(value: Ratio<i64>) -> Self {
        Smoothness::Fraction(value)
    }
}

/// A Matern kernel using a smoothness parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MaternKernel {
    /// Only 0.5, 1.5 or 2.5. Larger values give smoother interpolations.
    nu: f64,
    lengthscale_prior: Option<Box<dyn Prior>>,
    lengthscale_initial_value: Option<f64>,
}

impl Default for MaternKernel {
    fn default() -> Self {
        Self {
            nu: DEFAULT_NU,
            lengthscale_prior: None,
            lengthscale_initial_value: None,
        }
    }
}

impl MaternKernel {
    /// Create a Matern kernel with the given smoothness.
    ///
    /// # Errors
    ///
    /// * [`KernelError::InvalidInput`] if textual input is not a fraction
    /// * [`KernelError::ConstraintViolation`] if the value is not one of [`ALLOWED_NU`]
    pub fn new(nu: impl Into<Smoothness>) -> Result<Self> {
        Self::from_parts(nu, None, None)
    }

    /// Validated constructor taking every field at once
    pub fn from_parts(
        nu: impl Into<Smoothness>,
        lengthscale_prior: Option<Box<dyn Prior>>,
        lengthscale_initial_value: Option<f64>,
    ) -> Result<Self> {
        let nu = nu.into().to_f64()?;
        if !ALLOWED_NU.contains(&nu) {
            return Err(KernelError::constraint(
                "nu",
                nu,
                format!("must be one of {ALLOWED_NU:?}"),
            ));
        }
        let lengthscale_initial_value = lengthscale_initial_value
            .map(|v| finite_float("lengthscale_initial_value", v))
            .transpose()?;

        Ok(Self {
            nu,
            lengthscale_prior,
            lengthscale_initial_value,
        })
    }

    /// Builder method to attach a lengthscale prior
    pub fn with_lengthscale_prior(self, prior: impl Prior + 'static) -> Self {
        self.with_boxed_lengthscale_prior(Box::new(prior))
    }

    pub fn with_boxed_lengthscale_prior(mut self, prior: Box<dyn Prior>) -> Self {
        self.lengthscale_prior = Some(prior);
        self
    }

    /// Builder method to set the initial lengthscale; must be finite
    pub fn with_lengthscale_initial_value(mut self, value: f64) -> Result<Self> {
        self.lengthscale_initial_value = Some(finite_float("lengthscale_initial_value", value)?);
        Ok(self)
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    pub fn lengthscale_prior(&self) -> Option<&dyn Prior> {
        self.lengthscale_prior.as_deref()
    }

    pub fn lengthscale_initial_value(&self) -> Option<f64> {
        self.lengthscale_initial_value
    }
}

impl Kernel for MaternKernel {
    fn type_name(&self) -> &'static str {
        "MaternKernel"
    }

    fn build_runtime(&self, ctx: &ConversionContext) -> Result<RuntimeKernel> {
        let prior = self.lengthscale_prior.as_ref().map(|p| p.to_runtime());
        Ok(RuntimeKernel::Matern(MaternRuntime::new(self.nu, prior, ctx)?))
    }

    fn apply_initial_values(
        &self,
        kernel: &mut RuntimeKernel,
        ctx: &ConversionContext,
    ) -> Result<()> {
        let Some(value) = self.lengthscale_initial_value else {
            return Ok(());
        };
        let found = kernel.name();
        let matern = kernel
            .as_matern_mut()
            .ok_or_else(|| KernelError::type_constraint("kernel", "MaternKernel", found))?;
        trace!(lengthscale = value, "Overriding initial lengthscale");
        matern.set_lengthscale(&tensor(value, ctx.dtype))
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), json!(self.type_name()));
        map.insert("nu".into(), json!(self.nu));
        if let Some(prior) = &self.lengthscale_prior {
            map.insert("lengthscale_prior".into(), prior.to_value());
        }
        if let Some(value) = self.lengthscale_initial_value {
            map.insert("lengthscale_initial_value".into(), json!(value));
        }
        Value::Object(map)
    }

    fn clone_box(&self) -> Box<dyn Kernel> {
        Box::new(self.clone())
    }
}

/// A kernel for decorating existing kernels with an outputscale.
#[derive(Debug, Clone)]
pub struct ScaleKernel {
    base_kernel: Box<dyn Kernel>,
    outputscale_prior: Option<Box<dyn Prior>>,
    outputscale_initial_value: Option<f64>,
}

impl PartialEq for ScaleKernel {
    fn eq(&self, other: &Self) -> bool {
        *self.base_kernel == *other.base_kernel
            && self.outputscale_prior == other.outputscale_prior
            && self.outputscale_initial_value == other.outputscale_initial_value
    }
}

impl ScaleKernel {
    pub fn new(base_kernel: impl Kernel + 'static) -> Self {
        Self::from_boxed(Box::new(base_kernel))
    }

    pub fn from_boxed(base_kernel: Box<dyn Kernel>) -> Self {
        Self {
            base_kernel,
            outputscale_prior: None,
            outputscale_initial_value: None,
        }
    }

    /// Validated constructor taking every field at once
    pub fn from_parts(
        base_kernel: Box<dyn Kernel>,
        outputscale_prior: Option<Box<dyn Prior>>,
        outputscale_initial_value: Option<f64>,
    ) -> Result<Self> {
        let outputscale_initial_value = outputscale_initial_value
            .map(|v| finite_float("outputscale_initial_value", v))
            .transpose()?;

        Ok(Self {
            base_kernel,
            outputscale_prior,
            outputscale_initial_value,
        })
    }

    /// Builder method to attach an outputscale prior
    pub fn with_outputscale_prior(self, prior: impl Prior + 'static) -> Self {
        self.with_boxed_outputscale_prior(Box::new(prior))
    }

    pub fn with_boxed_outputscale_prior(mut self, prior: Box<dyn Prior>) -> Self {
        self.outputscale_prior = Some(prior);
        self
    }

    /// Builder method to set the initial outputscale; must be finite
    pub fn with_outputscale_initial_value(mut self, value: f64) -> Result<Self> {
        self.outputscale_initial_value = Some(finite_float("outputscale_initial_value", value)?);
        Ok(self)
    }

    pub fn base_kernel(&self) -> &dyn Kernel {
        self.base_kernel.as_ref()
    }

    pub fn outputscale_prior(&self) -> Option<&dyn Prior> {
        self.outputscale_prior.as_deref()
    }

    pub fn outputscale_initial_value(&self) -> Option<f64> {
        self.outputscale_initial_value
    }
}

impl Kernel for ScaleKernel {
    fn type_name(&self) -> &'static str {
        "ScaleKernel"
    }

    fn build_runtime(&self, ctx: &ConversionContext) -> Result<RuntimeKernel> {
        let base = self.base_kernel.to_runtime(ctx)?;
        let prior = self.outputscale_prior.as_ref().map(|p| p.to_runtime());
        Ok(RuntimeKernel::Scale(ScaleRuntime::new(base, prior, ctx)?))
    }

    fn apply_initial_values(
        &self,
        kernel: &mut RuntimeKernel,
        ctx: &ConversionContext,
    ) -> Result<()> {
        let Some(value) = self.outputscale_initial_value else {
            return Ok(());
        };
        let found = kernel.name();
        let scale = kernel
            .as_scale_mut()
            .ok_or_else(|| KernelError::type_constraint("kernel", "ScaleKernel", found))?;
        trace!(outputscale = value, "Overriding initial outputscale");
        scale.set_outputscale(&tensor(value, ctx.dtype))
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), json!(self.type_name()));
        map.insert("base_kernel".into(), self.base_kernel.to_value());
        if let Some(prior) = &self.outputscale_prior {
            map.insert("outputscale_prior".into(), prior.to_value());
        }
        if let Some(value) = self.outputscale_initial_value {
            map.insert("outputscale_initial_value".into(), json!(value));
        }
        Value::Object(map)
    }

    fn clone_box(&self) -> Box<dyn Kernel> {
        Box::new(self.clone())
    }
}
