//! Functional-unit control signals and the opcode set.
//!
//! This module defines the signals that control unit execution. It performs:
//! 1. **Operation Classification:** The closed set of primitive and fused
//!    macro-opcodes a tile's functional units decode.
//! 2. **Operand Selection:** Per-port source selectors routing input lanes
//!    into a unit's operand slots.
//! 3. **Predicate Control:** The global predicate-enable flag gating the
//!    external-predicate lane into result predicates.

use crate::common::error::ConfigError;

/// Operation codes for primitive and fused floating-point units.
///
/// Discriminants are explicit and stable: traces recorded against one build
/// compare bit-for-bit against any other. Fused macro-opcodes name the chain
/// they activate, first stage first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FuOp {
    /// No operation; every unit deasserts its outputs.
    #[default]
    Nop = 0,

    /// Floating-point addition.
    FAdd = 1,

    /// Floating-point addition against the constant lane.
    FAddConst = 2,

    /// Floating-point subtraction.
    FSub = 3,

    /// Floating-point subtraction of the constant lane.
    FSubConst = 4,

    /// Floating-point multiplication.
    FMul = 5,

    /// Floating-point multiplication by the constant lane.
    FMulConst = 6,

    /// Bit-pattern equality comparison.
    Eq = 10,

    /// Bit-pattern equality against the constant lane.
    EqConst = 11,

    /// Less-than comparison.
    Lt = 12,

    /// Less-than-or-equal comparison.
    Lte = 13,

    /// Greater-than comparison.
    Gt = 14,

    /// Greater-than-or-equal comparison.
    Gte = 15,

    /// Conditional select: condition operand picks one of two values.
    Sel = 20,

    /// Control-flow merge: first operand with an asserted predicate wins.
    Phi = 21,

    /// Fused multiply then add.
    FMulFAdd = 30,

    /// Fused multiply then subtract.
    FMulFSub = 31,

    /// Fused multiply then add then add.
    FMulFAddFAdd = 32,

    /// Fused multiply then subtract then subtract.
    FMulFSubFSub = 33,

    /// Fused add then add.
    FAddFAdd = 34,

    /// Fused add then add then add.
    FAddFAddFAdd = 35,

    /// Fused merge then add.
    PhiFAdd = 36,

    /// Fused merge then add then add.
    PhiFAddFAdd = 37,

    /// Relational macro: equality.
    FEq = 40,

    /// Relational macro: less-than.
    FLt = 41,

    /// Relational macro: less-than-or-equal.
    FLte = 42,

    /// Relational macro: greater-than.
    FGt = 43,

    /// Relational macro: greater-than-or-equal.
    FGte = 44,

    /// Relational macro: equality feeding a select.
    FEqSel = 45,

    /// Relational macro: less-than feeding a select.
    FLtSel = 46,

    /// Relational macro: less-than-or-equal feeding a select.
    FLteSel = 47,

    /// Relational macro: greater-than feeding a select.
    FGtSel = 48,

    /// Relational macro: greater-than-or-equal feeding a select.
    FGteSel = 49,
}

/// Control message consumed by a functional unit, one per cycle.
///
/// Produced externally each cycle and consumed combinationally; it is never
/// held beyond the cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CtrlMsg {
    /// Operation to decode this cycle.
    pub op: FuOp,
    /// Global predicate-enable: AND the external-predicate lane into the
    /// result predicate.
    pub predicate: bool,
    /// One-based operand source selectors, one per operand slot; 0 marks the
    /// slot unused this cycle.
    pub operand_src: Vec<u8>,
}

impl CtrlMsg {
    /// Builds a control message.
    pub const fn new(op: FuOp, predicate: bool, operand_src: Vec<u8>) -> Self {
        Self {
            op,
            predicate,
            operand_src,
        }
    }

    /// Selector for operand slot `slot`, or 0 (unused) when absent.
    pub fn src(&self, slot: usize) -> u8 {
        self.operand_src.get(slot).copied().unwrap_or(0)
    }

    /// Validates every selector against the unit's configured lane count.
    ///
    /// Selector range is a configuration property of the schedule: it is
    /// checked once at elaboration, never per cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SelectorOutOfRange`] for any selector
    /// addressing a lane beyond `num_inports`.
    pub fn validate(&self, num_inports: usize) -> Result<(), ConfigError> {
        for &selector in &self.operand_src {
            if usize::from(selector) > num_inports {
                return Err(ConfigError::SelectorOutOfRange {
                    selector,
                    lanes: num_inports,
                });
            }
        }
        Ok(())
    }
}

/// Control input port: a control message plus its validity flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CtrlIn {
    /// Producer asserted a control message this cycle.
    pub en: bool,
    /// The message; only meaningful while `en` is set.
    pub msg: CtrlMsg,
}

impl CtrlIn {
    /// A valid control input carrying `msg`.
    pub const fn issue(msg: CtrlMsg) -> Self {
        Self { en: true, msg }
    }
}
