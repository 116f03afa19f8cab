//! Per-unit cycle driver.
//!
//! This module steps one functional unit through simulated cycles. It
//! performs the following:
//! 1. **Elaboration:** Validates a schedule's control messages against the
//!    unit configuration before the first cycle runs.
//! 2. **Cycle Stepping:** One `eval` per cycle with activity accounting.
//! 3. **Program Runs:** Driving a whole vector of cycle snapshots, the same
//!    source/sink discipline the test harness uses.

use crate::common::error::ConfigError;
use crate::config::FuConfig;
use crate::core::ports::{FuInput, FuOutput};
use crate::core::signals::CtrlMsg;
use crate::core::traits::FunctionalUnit;
use crate::stats::FuStats;

/// Validates every control message of a schedule against a configuration.
///
/// Selector range is a property of the schedule, not of a cycle: it is
/// checked here once, and per-cycle evaluation assumes it holds.
///
/// # Errors
///
/// Returns the first [`ConfigError`] found in the schedule.
pub fn validate_program(config: &FuConfig, program: &[CtrlMsg]) -> Result<(), ConfigError> {
    config.validate()?;
    for msg in program {
        msg.validate(config.num_inports)?;
    }
    Ok(())
}

/// Drives one functional unit cycle by cycle.
#[derive(Debug)]
pub struct FuDriver<U> {
    unit: U,
    /// Activity counters accumulated over every stepped cycle.
    pub stats: FuStats,
    cycle: u64,
}

impl<U: FunctionalUnit> FuDriver<U> {
    /// Wraps a unit in a driver with fresh statistics.
    pub fn new(unit: U) -> Self {
        Self {
            unit,
            stats: FuStats::default(),
            cycle: 0,
        }
    }

    /// The driven unit.
    pub const fn unit(&self) -> &U {
        &self.unit
    }

    /// Evaluates one cycle and records its outcome.
    pub fn step(&mut self, input: &FuInput) -> FuOutput {
        let output = self.unit.eval(input);
        self.stats.record(input, &output);
        tracing::trace!(
            cycle = self.cycle,
            op = ?input.ctrl.msg.op,
            produced = output.result().is_some(),
            "step"
        );
        self.cycle += 1;
        output
    }

    /// Runs a whole program of cycle snapshots, returning every cycle's
    /// output snapshot.
    pub fn run(&mut self, program: &[FuInput]) -> Vec<FuOutput> {
        program.iter().map(|input| self.step(input)).collect()
    }
}
