//! Common utilities and types used throughout the CGRA tile simulator.
//!
//! This module provides fundamental building blocks that are shared across all
//! components of the simulator. It includes:
//! 1. **Operand Layout:** The fixed-width floating-point payload layout with
//!    sign/exponent/significand field slicing and `f64` conversion.
//! 2. **Error Handling:** Construction-time configuration error types.

/// Error types for construction-time configuration failures.
pub mod error;

/// Operand bit layout and field slicing.
pub mod float;

pub use error::ConfigError;
pub use float::FloatLayout;
