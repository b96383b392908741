//! Concrete prior configurations

use super::Prior;
use crate::error::{KernelError, Result};
use crate::runtime::RuntimePrior;
use crate::utils::{finite_float, positive_float};
use serde_json::{json, Value};

/// Gamma distribution parameterized by concentration and rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaPrior {
    concentration: f64,
    rate: f64,
}

impl GammaPrior {
    pub fn new(concentration: f64, rate: f64) -> Result<Self> {
        Ok(Self {
            concentration: positive_float("concentration", concentration)?,
            rate: positive_float("rate", rate)?,
        })
    }

    pub fn concentration(&self) -> f64 {
        self.concentration
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Prior for GammaPrior {
    fn type_name(&self) -> &'static str {
        "GammaPrior"
    }

    fn to_runtime(&self) -> RuntimePrior {
        RuntimePrior::Gamma {
            concentration: self.concentration,
            rate: self.rate,
        }
    }

    fn to_value(&self) -> Value {
        json!({
            "type": self.type_name(),
            "concentration": self.concentration,
            "rate": self.rate,
        })
    }

    fn clone_box(&self) -> Box<dyn Prior> {
        Box::new(*self)
    }
}

/// Half-Cauchy distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfCauchyPrior {
    scale: f64,
}

impl HalfCauchyPrior {
    pub fn new(scale: f64) -> Result<Self> {
        Ok(Self {
            scale: positive_float("scale", scale)?,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Prior for HalfCauchyPrior {
    fn type_name(&self) -> &'static str {
        "HalfCauchyPrior"
    }

    fn to_runtime(&self) -> RuntimePrior {
        RuntimePrior::HalfCauchy { scale: self.scale }
    }

    fn to_value(&self) -> Value {
        json!({ "type": self.type_name(), "scale": self.scale })
    }

    fn clone_box(&self) -> Box<dyn Prior> {
        Box::new(*self)
    }
}

/// Normal distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalPrior {
    loc: f64,
    scale: f64,
}

impl NormalPrior {
    pub fn new(loc: f64, scale: f64) -> Result<Self> {
        Ok(Self {
            loc: finite_float("loc", loc)?,
            scale: positive_float("scale", scale)?,
        })
    }

    pub fn loc(&self) -> f64 {
        self.loc
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Prior for NormalPrior {
    fn type_name(&self) -> &'static str {
        "NormalPrior"
    }

    fn to_runtime(&self) -> RuntimePrior {
        RuntimePrior::Normal {
            loc: self.loc,
            scale: self.scale,
        }
    }

    fn to_value(&self) -> Value {
        json!({ "type": self.type_name(), "loc": self.loc, "scale": self.scale })
    }

    fn clone_box(&self) -> Box<dyn Prior> {
        Box::new(*self)
    }
}

/// Half-normal distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfNormalPrior {
    scale: f64,
}

impl HalfNormalPrior {
    pub fn new(scale: f64) -> Result<Self> {
        Ok(Self {
            scale: positive_float("scale", scale)?,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Prior for HalfNormalPrior {
    fn type_name(&self) -> &'static str {
        "HalfNormalPrior"
    }

    fn to_runtime(&self) -> RuntimePrior {
        RuntimePrior::HalfNormal { scale: self.scale }
    }

    fn to_value(&self) -> Value {
        json!({ "type": self.type_name(), "scale": self.scale })
    }

    fn clone_box(&self) -> Box<dyn Prior> {
        Box::new(*self)
    }
}

/// Log-normal distribution; `loc` and `scale` refer to the underlying normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormalPrior {
    loc: f64,
    scale: f64,
}

impl LogNormalPrior {
    pub fn new(loc: f64, scale: f64) -> Result<Self> {
        Ok(Self {
            loc: finite_float("loc", loc)?,
            scale: positive_float("scale", scale)?,
        })
    }

    pub fn loc(&self) -> f64 {
        self.loc
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Prior for LogNormalPrior {
    fn type_name(&self) -> &'static str {
        "LogNormalPrior"
    }

    fn to_runtime(&self) -> RuntimePrior {
        RuntimePrior::LogNormal {
            loc: self.loc,
            scale: self.scale,
        }
    }

    fn to_value(&self) -> Value {
        json!({ "type": self.type_name(), "loc": self.loc, "scale": self.scale })
    }

    fn clone_box(&self) -> Box<dyn Prior> {
        Box::new(*self)
    }
}

/// Approximately uniform on `[a, b]` with Gaussian tails of width `sigma`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedBoxPrior {
    a: f64,
    b: f64,
    sigma: f64,
}

impl SmoothedBoxPrior {
    pub const DEFAULT_SIGMA: f64 = 0.01;

    pub fn new(a: f64, b: f64) -> Result<Self> {
        Self::with_sigma(a, b, Self::DEFAULT_SIGMA)
    }

    pub fn with_sigma(a: f64, b: f64, sigma: f64) -> Result<Self> {
        let a = finite_float("a", a)?;
        let b = finite_float("b", b)?;
        if a >= b {
            return Err(KernelError::constraint(
                "b",
                b,
                format!("upper bound must exceed lower bound a = {a}"),
            ));
        }
        Ok(Self {
            a,
            b,
            sigma: positive_float("sigma", sigma)?,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Prior for SmoothedBoxPrior {
    fn type_name(&self) -> &'static str {
        "SmoothedBoxPrior"
    }

    fn to_runtime(&self) -> RuntimePrior {
        RuntimePrior::SmoothedBox {
            a: self.a,
            b: self.b,
            sigma: self.sigma,
        }
    }

    fn to_value(&self) -> Value {
        json!({ "type": self.type_name(), "a": self.a, "b": self.b, "sigma": self.sigma })
    }

    fn clone_box(&self) -> Box<dyn Prior> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_prior() {
        let prior = GammaPrior::new(3.0, 6.0).unwrap();
        assert_eq!(
            prior.to_runtime(),
            RuntimePrior::Gamma { concentration: 3.0, rate: 6.0 }
        );
        assert_eq!(prior.to_value()["type"], "GammaPrior");
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(GammaPrior::new(0.0, 1.0).is_err());
        assert!(GammaPrior::new(1.0, f64::INFINITY).is_err());
        assert!(HalfCauchyPrior::new(-1.0).is_err());
        assert!(NormalPrior::new(f64::NAN, 1.0).is_err());
        assert!(HalfNormalPrior::new(0.0).is_err());
        assert!(LogNormalPrior::new(0.0, -2.0).is_err());
    }

    #[test]
    fn test_smoothed_box_bounds() {
        let prior = SmoothedBoxPrior::new(0.0, 1.0).unwrap();
        assert_eq!(prior.sigma(), SmoothedBoxPrior::DEFAULT_SIGMA);

        let err = SmoothedBoxPrior::new(1.0, 1.0).unwrap_err();
        assert!(matches!(err, KernelError::ConstraintViolation { .. }));
        assert!(SmoothedBoxPrior::with_sigma(0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_boxed_prior_equality() {
        let a: Box<dyn Prior> = Box::new(NormalPrior::new(0.0, 1.0).unwrap());
        let b = a.clone();
        let c: Box<dyn Prior> = Box::new(HalfNormalPrior::new(1.0).unwrap());
        assert!(*a == *b);
        assert!(*a != *c);
    }
}
