//! Control-flow merge (phi) unit.
//!
//! Models the join point of two control-flow paths: of the two selected
//! operands, the first one carrying an asserted predicate wins and is
//! re-emitted with a true predicate. When neither path has fired, the unit
//! produces a zero payload with a false predicate.

use crate::common::error::ConfigError;
use crate::config::FuConfig;
use crate::core::ports::{FuInput, FuOutput, OperandMsg};
use crate::core::signals::FuOp;
use crate::core::traits::FunctionalUnit;
use crate::core::units::{broadcast, select_operands, starved};

/// Control-flow merge unit.
#[derive(Clone, Copy, Debug)]
pub struct Phi {
    num_inports: usize,
    num_outports: usize,
}

impl Phi {
    /// Builds a phi unit from a tile configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the port geometry is too small for a
    /// two-operand unit.
    pub fn new(config: &FuConfig) -> Result<Self, ConfigError> {
        config.require_ports(2, 1)?;
        Ok(Self {
            num_inports: config.num_inports,
            num_outports: config.num_outports,
        })
    }
}

impl FunctionalUnit for Phi {
    fn num_inports(&self) -> usize {
        self.num_inports
    }

    fn num_outports(&self) -> usize {
        self.num_outports
    }

    fn eval(&mut self, input: &FuInput) -> FuOutput {
        let ctrl = &input.ctrl;
        let mut out = FuOutput::quiet(self.num_outports, self.num_inports);
        let (in0, in1) = select_operands(ctrl, &mut out);

        if ctrl.msg.op != FuOp::Phi {
            tracing::trace!(op = ?ctrl.msg.op, "phi: unrecognized opcode, outputs withheld");
            return out;
        }

        let lane_a = input.lane(in0);
        let lane_b = input.lane(in1);
        // Operand 0 wins when both paths fired.
        let mut msg = if lane_a.msg.predicate {
            OperandMsg::new(lane_a.msg.payload, true)
        } else if lane_b.msg.predicate {
            OperandMsg::new(lane_b.msg.payload, true)
        } else {
            OperandMsg::default()
        };

        if starved(input, &mut out, in0, in1) {
            msg.predicate = false;
        }
        if ctrl.msg.predicate {
            msg.predicate = msg.predicate && input.ext_predicate.predicate;
        }

        broadcast(&mut out, ctrl.en, msg);
        out
    }
}
