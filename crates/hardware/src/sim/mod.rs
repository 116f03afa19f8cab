//! Simulation driving utilities.
//!
//! Provides the per-unit cycle driver that steps a functional unit over a
//! program of cycle snapshots and collects activity statistics.

pub mod driver;

pub use driver::FuDriver;
