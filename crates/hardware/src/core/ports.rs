//! Per-cycle port snapshots for the unit handshake.
//!
//! This module defines the messages carried between a functional unit and its
//! surroundings within one cycle:
//! 1. **Operand Lanes:** Tagged values with per-lane validity and occupancy.
//! 2. **Side Lanes:** The constant-operand lane and the external-predicate
//!    lane.
//! 3. **Snapshots:** The full input bundle a unit consumes and the output
//!    bundle (results, enables, readiness) it produces.
//!
//! Evaluation is combinational: a unit is handed an [`FuInput`] snapshot of
//! the current cycle and returns an [`FuOutput`] snapshot, with no hidden
//! state in between.

use crate::core::signals::CtrlIn;

/// One tagged operand: a bit-packed payload plus its predicate bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperandMsg {
    /// Bit-packed floating-point payload.
    pub payload: u64,
    /// Validity/guard flag carried alongside the payload.
    pub predicate: bool,
}

impl OperandMsg {
    /// Builds an operand message.
    pub const fn new(payload: u64, predicate: bool) -> Self {
        Self { payload, predicate }
    }
}

/// Input-lane snapshot: the lane's current operand, its valid flag, and the
/// lane's occupancy counter.
///
/// `count` is the number of in-flight consumers still needing the lane's
/// current value; a unit asked to consume a lane whose count is zero
/// withholds readiness and invalidates its result for the cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LaneIn {
    /// Producer asserted a value on this lane this cycle.
    pub en: bool,
    /// The lane's operand message.
    pub msg: OperandMsg,
    /// Remaining occupancy of the lane's current value.
    pub count: u32,
}

impl LaneIn {
    /// A valid lane holding `msg` with one pending consumer.
    pub const fn occupied(msg: OperandMsg) -> Self {
        Self {
            en: true,
            msg,
            count: 1,
        }
    }
}

/// External-predicate lane snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredicateIn {
    /// Producer asserted a predicate message this cycle.
    pub en: bool,
    /// The predicate bit itself.
    pub predicate: bool,
}

/// Full input snapshot a unit consumes in one cycle.
#[derive(Clone, Debug, Default)]
pub struct FuInput {
    /// Operand input lanes.
    pub lanes: Vec<LaneIn>,
    /// Constant-operand lane, used by the `*Const` opcodes.
    pub constant: OperandMsg,
    /// External-predicate lane, gated by the control message's
    /// predicate-enable flag.
    pub ext_predicate: PredicateIn,
    /// Control input for the cycle.
    pub ctrl: CtrlIn,
}

impl FuInput {
    /// An idle snapshot with `num_lanes` empty lanes and no control message.
    pub fn idle(num_lanes: usize) -> Self {
        Self {
            lanes: vec![LaneIn::default(); num_lanes],
            ..Self::default()
        }
    }

    /// Lane snapshot at `index`, or an empty lane when out of range.
    ///
    /// Out-of-range selectors are rejected at elaboration; tolerating them
    /// here keeps per-cycle evaluation total.
    pub fn lane(&self, index: usize) -> LaneIn {
        self.lanes.get(index).copied().unwrap_or_default()
    }
}

/// One output port: a result message plus its enable bit.
///
/// The message is meaningful only while `en` is set; a deasserted enable is
/// the unit's explicit "no output this cycle".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PortOut {
    /// Result produced this cycle.
    pub en: bool,
    /// The result message.
    pub msg: OperandMsg,
}

/// Full output snapshot a unit produces in one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FuOutput {
    /// Result ports, all carrying the selected result when enabled.
    pub ports: Vec<PortOut>,
    /// Consumer side of the lane handshake: ready to accept the next value
    /// on the lanes actually consumed this cycle.
    pub lane_ready: Vec<bool>,
    /// Ready on the external-predicate lane.
    pub predicate_ready: bool,
}

impl FuOutput {
    /// An all-deasserted output: no results, no readiness.
    pub fn quiet(num_outports: usize, num_inports: usize) -> Self {
        Self {
            ports: vec![PortOut::default(); num_outports],
            lane_ready: vec![false; num_inports],
            predicate_ready: false,
        }
    }

    /// The first port's message regardless of its enable.
    ///
    /// Fused units chain this into downstream stages; external consumers
    /// should use [`Self::result`] instead.
    pub fn message(&self) -> OperandMsg {
        self.ports.first().map_or_else(OperandMsg::default, |p| p.msg)
    }

    /// The produced result, if the unit asserted one this cycle.
    pub fn result(&self) -> Option<OperandMsg> {
        self.ports.first().and_then(|p| p.en.then_some(p.msg))
    }
}
