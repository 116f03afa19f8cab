//! Functional units of a CGRA tile.
//!
//! This module contains the primitive units (floating-point compare, add,
//! multiply, select, phi) and the fused compositions built from them, plus
//! the receive/send handshake discipline they all share.
//!
//! The handshake helpers here mirror the common base every unit follows:
//! operand-port selection from the control message's source selectors, lane
//! readiness assertion for the lanes actually consumed, and the
//! starved-operand guard on the lanes' occupancy counters.

use crate::core::ports::{FuInput, FuOutput, OperandMsg, PortOut};
use crate::core::signals::CtrlIn;

/// Floating-point adder/subtractor unit.
pub mod add;

/// Floating-point compare unit.
pub mod compare;

/// Floating-point arithmetic primitive (the external collaborator boundary).
pub mod fpu;

/// Fused composition units (sequential chains, parallel-then-combine,
/// compare-then-select, phi-then-add).
pub mod fused;

/// Floating-point multiplier unit.
pub mod mul;

/// Control-flow merge (phi) unit.
pub mod phi;

/// Conditional select unit.
pub mod select;

/// Asserts readiness on `lane` if it exists.
pub(crate) fn set_ready(out: &mut FuOutput, lane: usize, ready: bool) {
    if let Some(slot) = out.lane_ready.get_mut(lane) {
        *slot = ready;
    }
}

/// Operand-port selection and readiness for a two-operand unit.
///
/// Resolves the control message's first two source selectors to zero-based
/// lane indices (an unused selector leaves the slot on lane 0), asserts
/// readiness on each selected lane, and claims the external-predicate lane
/// when the predicate-enable flag is set.
pub(crate) fn select_operands(ctrl: &CtrlIn, out: &mut FuOutput) -> (usize, usize) {
    let mut in0 = 0;
    let mut in1 = 0;
    if ctrl.en {
        let s0 = ctrl.msg.src(0);
        if s0 != 0 {
            in0 = usize::from(s0 - 1);
            set_ready(out, in0, true);
        }
        let s1 = ctrl.msg.src(1);
        if s1 != 0 {
            in1 = usize::from(s1 - 1);
            set_ready(out, in1, true);
        }
        if ctrl.msg.predicate {
            out.predicate_ready = true;
        }
    }
    (in0, in1)
}

/// Starved-operand guard over two consuming lanes.
///
/// A lane with zero remaining occupancy has no value left to consume:
/// readiness is withheld on both lanes and the caller must force its result
/// predicate false for the cycle.
pub(crate) fn starved(input: &FuInput, out: &mut FuOutput, in0: usize, in1: usize) -> bool {
    if input.ctrl.en && (input.lane(in0).count == 0 || input.lane(in1).count == 0) {
        set_ready(out, in0, false);
        set_ready(out, in1, false);
        true
    } else {
        false
    }
}

/// Drives `msg` onto every output port with the given enable.
pub(crate) fn broadcast(out: &mut FuOutput, en: bool, msg: OperandMsg) {
    for port in &mut out.ports {
        *port = PortOut { en, msg };
    }
}
