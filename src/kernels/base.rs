//! The kernel configuration capability

use crate::config::ConversionContext;
use crate::error::Result;
use crate::runtime::RuntimeKernel;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// An immutable kernel configuration that can be turned into a runtime kernel.
///
/// Conversion happens in two phases. [`Kernel::build_runtime`] performs the
/// structural translation (kernel family, priors, shapes). Afterwards
/// [`Kernel::apply_initial_values`] overwrites hyperparameters on that fresh
/// object with user supplied starting values. The override phase is the only
/// place where a runtime object is mutated after construction.
pub trait Kernel: fmt::Debug + Send + Sync {
    /// Name used as the `"type"` tag when serialized
    fn type_name(&self) -> &'static str;

    /// Structural conversion without initial hyperparameter values
    fn build_runtime(&self, ctx: &ConversionContext) -> Result<RuntimeKernel>;

    /// Overwrite hyperparameters of a freshly built runtime kernel
    fn apply_initial_values(
        &self,
        _kernel: &mut RuntimeKernel,
        _ctx: &ConversionContext,
    ) -> Result<()> {
        Ok(())
    }

    /// Convert into a runtime kernel.
    fn to_runtime(&self, ctx: &ConversionContext) -> Result<RuntimeKernel> {
        debug!(
            kernel = self.type_name(),
            ard_num_dims = ?ctx.ard_num_dims,
            batch_shape = ?ctx.batch_shape,
            dtype = ?ctx.dtype,
            "Converting kernel config to runtime kernel"
        );
        let mut kernel = self.build_runtime(ctx)?;
        self.apply_initial_values(&mut kernel, ctx)?;
        Ok(kernel)
    }

    /// Tagged JSON representation
    fn to_value(&self) -> Value;

    fn clone_box(&self) -> Box<dyn Kernel>;
}

impl Clone for Box<dyn Kernel> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn Kernel {
    fn eq(&self, other: &Self) -> bool {
        self.to_value() == other.to_value()
    }
}
