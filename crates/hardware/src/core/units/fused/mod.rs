//! Fused composition units.
//!
//! Each fused unit statically owns two or three simpler units and decodes a
//! macro-opcode into per-stage opcodes. This module provides:
//! 1. **Topology Helpers:** The fixed wiring shared by the sequential,
//!    parallel-then-combine, and compare-then-select families.
//! 2. **The Units:** Mul→add→add (sequential), mul∥add→add, add∥add→add,
//!    phi∥add→add, and compare→select.
//!
//! Sub-unit operand selectors are hard-wired to "my ports 1 and 2" (and 3
//! for the select stage): the fused boundary does not expose per-stage
//! operand remapping. Internally chained stage inputs carry the upstream
//! stage's output with occupancy pinned to 1, so starvation can only enter
//! through the shared input lanes. An unrecognized macro-opcode deasserts
//! every output enable; there is never a silently-stale output.

use crate::core::ports::{FuInput, FuOutput, LaneIn, OperandMsg, PredicateIn};
use crate::core::signals::{CtrlIn, CtrlMsg, FuOp};
use crate::core::units::{broadcast, set_ready};

/// Compare-then-select unit.
pub mod comp_sel;

/// Phi and adder in parallel followed by an adder.
pub mod phi_add_add;

/// Two adders in parallel followed by an adder.
pub mod prl_add_add_add;

/// Multiplier and adder in parallel followed by an adder.
pub mod prl_mul_add_add;

/// Multiplier and two adders in sequence.
pub mod seq_mul_add_add;

pub use comp_sel::CompSel;
pub use phi_add_add::PhiAddAdder;
pub use prl_add_add_add::PrlAddAddAdder;
pub use prl_mul_add_add::PrlMulAddAdder;
pub use seq_mul_add_add::SeqMulAddAdder;

/// Fixed two-operand stage control: read my ports 1 and 2.
pub(crate) fn stage_ctrl(en: bool, op: FuOp) -> CtrlIn {
    CtrlIn {
        en,
        msg: CtrlMsg::new(op, false, vec![1, 2]),
    }
}

/// Fixed three-operand stage control: read my ports 1, 2 and 3.
pub(crate) fn stage_ctrl3(en: bool, op: FuOp) -> CtrlIn {
    CtrlIn {
        en,
        msg: CtrlMsg::new(op, false, vec![1, 2, 3]),
    }
}

/// Input snapshot for one stage. The constant and external-predicate lanes
/// are not forwarded into stages; those belong to the fused boundary.
pub(crate) fn stage_input(lanes: Vec<LaneIn>, ctrl: CtrlIn) -> FuInput {
    FuInput {
        lanes,
        constant: OperandMsg::default(),
        ext_predicate: PredicateIn::default(),
        ctrl,
    }
}

/// An internally chained stage input: always valid, never starved.
pub(crate) fn chained(msg: OperandMsg) -> LaneIn {
    LaneIn {
        en: true,
        msg,
        count: 1,
    }
}

/// Output enable of a fused unit: control valid and every shared lane valid.
pub(crate) fn lanes_valid(input: &FuInput, used: usize) -> bool {
    input.ctrl.en && (0..used).all(|idx| input.lane(idx).en)
}

/// Folds a stage's readiness for its shared lanes back onto the fused
/// boundary; `map` pairs `(stage_lane, shared_lane)`.
pub(crate) fn merge_ready(out: &mut FuOutput, stage: &FuOutput, map: &[(usize, usize)]) {
    for &(stage_lane, shared_lane) in map {
        if stage.lane_ready.get(stage_lane).copied().unwrap_or(false) {
            set_ready(out, shared_lane, true);
        }
    }
}

/// Commits the selected stage message to every output port, applying the
/// external-predicate gate at the fused boundary.
pub(crate) fn commit(input: &FuInput, out: &mut FuOutput, en: bool, mut msg: OperandMsg) {
    if input.ctrl.en && input.ctrl.msg.predicate {
        out.predicate_ready = true;
        msg.predicate = msg.predicate && input.ext_predicate.predicate;
    }
    broadcast(out, en, msg);
}
