//! Conditional select unit.
//!
//! Three operand slots: a condition and two candidate values. A condition
//! payload of exactly 1 (the compare units' true encoding) picks the first
//! candidate; anything else picks the second. The result predicate combines
//! the condition's predicate with the chosen operand's predicate.

use crate::common::error::ConfigError;
use crate::config::FuConfig;
use crate::core::ports::{FuInput, FuOutput, OperandMsg};
use crate::core::signals::FuOp;
use crate::core::traits::FunctionalUnit;
use crate::core::units::{broadcast, select_operands, set_ready, starved};

/// Condition payload treated as "take the first candidate".
const COND_TRUE: u64 = 1;

/// Conditional select unit.
#[derive(Clone, Copy, Debug)]
pub struct Select {
    num_inports: usize,
    num_outports: usize,
}

impl Select {
    /// Builds a select unit from a tile configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the port geometry is too small for a
    /// three-operand unit.
    pub fn new(config: &FuConfig) -> Result<Self, ConfigError> {
        config.require_ports(3, 1)?;
        Ok(Self {
            num_inports: config.num_inports,
            num_outports: config.num_outports,
        })
    }
}

impl FunctionalUnit for Select {
    fn num_inports(&self) -> usize {
        self.num_inports
    }

    fn num_outports(&self) -> usize {
        self.num_outports
    }

    fn eval(&mut self, input: &FuInput) -> FuOutput {
        let ctrl = &input.ctrl;
        let mut out = FuOutput::quiet(self.num_outports, self.num_inports);
        // The first two slots follow the common handshake; the third slot
        // (false-candidate) is this unit's own.
        let (in0, in1) = select_operands(ctrl, &mut out);
        let mut in2 = 0;
        if ctrl.en {
            let s2 = ctrl.msg.src(2);
            if s2 != 0 {
                in2 = usize::from(s2 - 1);
                set_ready(&mut out, in2, true);
            }
        }

        if ctrl.msg.op != FuOp::Sel {
            tracing::trace!(op = ?ctrl.msg.op, "select: unrecognized opcode, outputs withheld");
            return out;
        }

        let cond = input.lane(in0);
        let taken = cond.msg.payload == COND_TRUE;
        let chosen = if taken { input.lane(in1) } else { input.lane(in2) };

        let mut predicate = cond.msg.predicate && chosen.msg.predicate;
        let starving =
            starved(input, &mut out, in0, in1) || (ctrl.en && input.lane(in2).count == 0);
        if starving {
            set_ready(&mut out, in0, false);
            set_ready(&mut out, in1, false);
            set_ready(&mut out, in2, false);
            predicate = false;
        }
        if ctrl.msg.predicate {
            predicate = predicate && input.ext_predicate.predicate;
        }

        broadcast(&mut out, ctrl.en, OperandMsg::new(chosen.msg.payload, predicate));
        out
    }
}
