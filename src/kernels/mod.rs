//! Kernel configurations for Gaussian-process surrogates
//!
//! A kernel config is an immutable, validated record. Calling
//! [`Kernel::to_runtime`] turns it into a [`RuntimeKernel`](crate::runtime::RuntimeKernel)
//! for model fitting.

mod base;
mod basic;

pub use base::Kernel;
pub use basic::{MaternKernel, ScaleKernel, Smoothness, ALLOWED_NU, DEFAULT_NU};
