//! CGRA tile functional-unit simulator library.
//!
//! This crate implements cycle-level models of the floating-point functional
//! units inside a CGRA tile, with the following:
//! 1. **Core:** Control signals, per-cycle port snapshots, and the common
//!    unit interface.
//! 2. **Units:** Primitive units (compare, add, multiply, select, phi) and
//!    the fused compositions built from them.
//! 3. **Arithmetic:** The external adder/multiplier primitive boundary and
//!    its shipped software model.
//! 4. **Simulation:** Per-unit cycle driver, configuration, and statistics
//!    collection.
//!
//! Each unit consumes a tagged operand snapshot plus a control opcode per
//! cycle and produces a result snapshot plus a predicate, emulating one
//! cycle of hardware behavior.

/// Common types (operand bit layout, configuration errors).
pub mod common;
/// Simulator configuration (defaults, per-unit structures, validation).
pub mod config;
/// Functional-unit core (signals, ports, traits, unit implementations).
pub mod core;
/// Cycle driver and schedule elaboration.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Per-unit configuration; use `FuConfig::default()` or deserialize from JSON.
pub use crate::config::FuConfig;
/// The common functional-unit interface.
pub use crate::core::traits::FunctionalUnit;
/// Per-unit cycle driver with statistics.
pub use crate::sim::FuDriver;
