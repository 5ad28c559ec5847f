//! Filter operations
//!
//! This module provides the kernel catalog, the 2D convolution engine and the
//! separable gaussian blur.

/// Filter kernels
pub mod kernels;

/// Filter configuration
mod config;
pub use config::*;

/// 2D kernel convolution
mod convolution;
pub use convolution::*;

/// Gaussian blur operations
mod gaussian;
pub use gaussian::*;

/// Filter dispatch by name
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
