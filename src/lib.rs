//! Kolosal Kernels - Gaussian-process kernel configuration
//!
//! This crate provides declarative, validated kernel configurations for the
//! surrogate models used in Bayesian optimization:
//! - Matern kernels with a discrete smoothness parameter
//! - Scale kernels decorating a base kernel with an outputscale
//! - Priors over kernel hyperparameters
//! - Conversion into runtime kernel objects for model fitting
//!
//! # Modules
//!
//! - [`kernels`] - Kernel configs and the [`Kernel`] capability
//! - [`priors`] - Prior configs and the [`Prior`] capability
//! - [`runtime`] - Runtime kernels, priors and tensors
//! - [`serialization`] - Tagged JSON representation of configs
//! - [`config`] - Process settings and conversion context
//! - [`utils`] - Shared validators and fraction parsing
//!
//! # Example
//!
//! ```
//! use kolosal_kernels::prelude::*;
//!
//! let kernel = ScaleKernel::new(
//!     MaternKernel::new("3/2")?
//!         .with_lengthscale_prior(GammaPrior::new(3.0, 6.0)?)
//!         .with_lengthscale_initial_value(2.0)?,
//! )
//! .with_outputscale_initial_value(0.5)?;
//!
//! let runtime = kernel.to_runtime(&ConversionContext::new().with_ard_num_dims(2))?;
//! assert_eq!(runtime.name(), "ScaleKernel");
//! # Ok::<(), kolosal_kernels::KernelError>(())
//! ```

// Core error handling
pub mod error;

// Configuration records
pub mod kernels;
pub mod priors;

// Conversion targets
pub mod runtime;

// Supporting modules
pub mod config;
pub mod serialization;
pub mod utils;

pub use error::{KernelError, Result};
pub use kernels::Kernel;
pub use priors::Prior;

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{KernelError, Result};

    // Kernels
    pub use crate::kernels::{Kernel, MaternKernel, ScaleKernel, Smoothness};

    // Priors
    pub use crate::priors::{
        GammaPrior, HalfCauchyPrior, HalfNormalPrior, LogNormalPrior, NormalPrior, Prior,
        SmoothedBoxPrior,
    };

    // Runtime
    pub use crate::runtime::{tensor, DType, RuntimeKernel, RuntimePrior, Tensor, DTYPE_FLOAT};

    // Configuration
    pub use crate::config::{ConversionContext, Settings};

    // Serialization
    pub use crate::serialization::{kernel_from_json, kernel_to_json, prior_from_json};
}
