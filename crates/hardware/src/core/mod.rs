//! Core functional-unit implementation.
//!
//! This module contains the tile's functional-unit layer: the control signals
//! that select and gate operations, the per-cycle port snapshots, the common
//! unit interface, and the primitive and fused unit implementations.

/// Per-cycle port snapshots (operand lanes, predicates, outputs).
pub mod ports;

/// Control signals and the opcode set.
pub mod signals;

/// The common functional-unit trait.
pub mod traits;

/// Functional units (compare, add, multiply, select, phi, fused compositions).
pub mod units;

pub use self::traits::FunctionalUnit;
