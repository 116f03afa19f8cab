//! Floating-point compare unit.
//!
//! Decodes the relational opcodes (`Eq`, `EqConst`, `Lt`, `Lte`, `Gt`, `Gte`)
//! against the operands' sign/exponent/significand fields and produces a
//! boolean-as-value result plus the combined predicate. It performs:
//! 1. **Field Decode:** Bit-equality, magnitude comparison, and the two-bit
//!    sign-pair code driving the decision tables.
//! 2. **Predicate Combination:** AND of both operand predicates, the
//!    `EqConst` single-operand asymmetry, and the external-predicate gate.
//! 3. **Starvation Guard:** Withheld readiness and a false result predicate
//!    when a consumed lane has no remaining occupancy.
//!
//! Equality is full-payload *bit* equality: two encodings of the same numeric
//! value compare unequal. This is the unit's contract, not an accident.

use crate::common::error::ConfigError;
use crate::common::float::FloatLayout;
use crate::config::FuConfig;
use crate::core::ports::{FuInput, FuOutput, OperandMsg};
use crate::core::signals::FuOp;
use crate::core::traits::FunctionalUnit;
use crate::core::units::{broadcast, select_operands, starved};

/// Payload encoding of a true comparison.
const TRUE_PAYLOAD: u64 = 1;

/// Payload encoding of a false comparison.
const FALSE_PAYLOAD: u64 = 0;

/// Sign-pair codes: `(sign0 << 1) | sign1`.
const SIGN_POS_POS: u8 = 0b00;
const SIGN_POS_NEG: u8 = 0b01;
const SIGN_NEG_POS: u8 = 0b10;
const SIGN_NEG_NEG: u8 = 0b11;

/// Floating-point compare unit.
#[derive(Clone, Copy, Debug)]
pub struct FpCompare {
    layout: FloatLayout,
    num_inports: usize,
    num_outports: usize,
}

impl FpCompare {
    /// Builds a compare unit from a tile configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the operand layout is unsupported or
    /// the port geometry is too small for a two-operand unit.
    pub fn new(config: &FuConfig) -> Result<Self, ConfigError> {
        let layout = config.layout()?;
        config.require_ports(2, 1)?;
        Ok(Self {
            layout,
            num_inports: config.num_inports,
            num_outports: config.num_outports,
        })
    }
}

impl FunctionalUnit for FpCompare {
    fn num_inports(&self) -> usize {
        self.num_inports
    }

    fn num_outports(&self) -> usize {
        self.num_outports
    }

    fn eval(&mut self, input: &FuInput) -> FuOutput {
        let ctrl = &input.ctrl;
        let op = ctrl.msg.op;
        let mut out = FuOutput::quiet(self.num_outports, self.num_inports);
        let (in0, in1) = select_operands(ctrl, &mut out);

        let lane_a = input.lane(in0);
        let lane_b = input.lane(in1);
        let a = lane_a.msg.payload;
        // The compare-against-constant variant substitutes the constant lane
        // for the second operand.
        let b = if op == FuOp::EqConst {
            input.constant.payload
        } else {
            lane_b.msg.payload
        };

        let is_equal = a == b;
        let sign = (u8::from(self.layout.sign(a)) << 1) | u8::from(self.layout.sign(b));
        // Magnitude comparison ignoring sign; the decision tables fold the
        // sign pair back in.
        let is_less = self.layout.exponent(a) < self.layout.exponent(b)
            || (self.layout.exponent(a) == self.layout.exponent(b)
                && self.layout.significand(a) < self.layout.significand(b));

        let truth = match op {
            FuOp::Eq | FuOp::EqConst => is_equal,
            FuOp::Lt => {
                sign == SIGN_NEG_POS
                    || (sign == SIGN_POS_POS && is_less)
                    || (sign == SIGN_NEG_NEG && !is_less && !is_equal)
            }
            FuOp::Lte => {
                (is_equal && sign == SIGN_NEG_POS)
                    || (sign == SIGN_POS_POS && is_less)
                    || (sign == SIGN_NEG_NEG && !is_less)
            }
            FuOp::Gt => {
                sign == SIGN_POS_NEG
                    || (sign == SIGN_POS_POS && !is_less && !is_equal)
                    || (sign == SIGN_NEG_NEG && is_less)
            }
            FuOp::Gte => {
                is_equal
                    || sign == SIGN_POS_NEG
                    || (sign == SIGN_POS_POS && !is_less)
                    || (sign == SIGN_NEG_NEG && is_less)
            }
            _ => {
                // Unrecognized opcode: no result this cycle. The readiness
                // handshake above is left as asserted.
                tracing::trace!(op = ?op, "compare: unrecognized opcode, outputs withheld");
                return out;
            }
        };

        let mut predicate = lane_a.msg.predicate && lane_b.msg.predicate;
        if starved(input, &mut out, in0, in1) {
            predicate = false;
        }
        // Documented asymmetry: the constant variant follows only the first
        // operand's predicate.
        if op == FuOp::EqConst {
            predicate = lane_a.msg.predicate;
        }
        if ctrl.msg.predicate {
            predicate = predicate && input.ext_predicate.predicate;
        }

        let payload = if truth { TRUE_PAYLOAD } else { FALSE_PAYLOAD };
        broadcast(&mut out, ctrl.en, OperandMsg::new(payload, predicate));
        out
    }
}
