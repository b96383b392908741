//! Runtime representation of kernels, priors and tensors
//!
//! Kernel configs are translated into these objects before model fitting.

pub mod kernels;
pub mod priors;
pub mod tensor;

pub use kernels::{MaternRuntime, RuntimeKernel, ScaleRuntime, DEFAULT_POSITIVE_VALUE};
pub use priors::RuntimePrior;
pub use tensor::{tensor, DType, Tensor, DTYPE_FLOAT};
