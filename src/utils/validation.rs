//! Shared numeric validators used at construction boundaries

use crate::error::{KernelError, Result};

/// Accept a float only if it is finite.
///
/// Returns the value unchanged so it can be used inline while building a
/// config. NaN and both infinities fail with
/// [`KernelError::ConstraintViolation`] naming `name`.
pub fn finite_float(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(KernelError::constraint(name, value, "must be a finite float"));
    }
    Ok(value)
}

/// Like [`finite_float`] but additionally requires `value > 0`.
pub fn positive_float(name: &str, value: f64) -> Result<f64> {
    let value = finite_float(name, value)?;
    if value <= 0.0 {
        return Err(KernelError::constraint(name, value, "must be strictly positive"));
    }
    Ok(value)
}
