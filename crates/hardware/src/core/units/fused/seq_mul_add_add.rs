//! Multiplier and two adders in sequence.
//!
//! Stage 0 multiplies shared lanes 0 and 1; stage 1 adds (or subtracts)
//! shared lane 2 onto the product; stage 2 adds (or subtracts) shared lane 3
//! onto that. The macro-opcode selects the active chain length, and the
//! final output is taken from the last *active* stage, not the last physical
//! one.
//!
//! The constant-operand multiply variant is not decoded here; it remains
//! explicitly unsupported at this boundary.

use crate::common::error::ConfigError;
use crate::config::FuConfig;
use crate::core::ports::{FuInput, FuOutput};
use crate::core::signals::FuOp;
use crate::core::traits::FunctionalUnit;
use crate::core::units::add::FpAdd;
use crate::core::units::fused::{chained, commit, lanes_valid, merge_ready, stage_ctrl, stage_input};
use crate::core::units::mul::FpMul;

/// Shared input lanes this topology consumes.
const USED_LANES: usize = 4;

/// Sequential mul→add→add unit.
#[derive(Debug)]
pub struct SeqMulAddAdder {
    num_inports: usize,
    num_outports: usize,
    fu0: FpMul,
    fu1: FpAdd,
    fu2: FpAdd,
}

impl SeqMulAddAdder {
    /// Builds the fused unit and its owned stages.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the operand layout is unsupported or
    /// fewer than four input lanes are configured.
    pub fn new(config: &FuConfig) -> Result<Self, ConfigError> {
        config.require_ports(USED_LANES, 1)?;
        let stage_cfg = config.stage(2);
        Ok(Self {
            num_inports: config.num_inports,
            num_outports: config.num_outports,
            fu0: FpMul::new(&stage_cfg)?,
            fu1: FpAdd::new(&stage_cfg)?,
            fu2: FpAdd::new(&stage_cfg)?,
        })
    }
}

impl FunctionalUnit for SeqMulAddAdder {
    fn num_inports(&self) -> usize {
        self.num_inports
    }

    fn num_outports(&self) -> usize {
        self.num_outports
    }

    fn eval(&mut self, input: &FuInput) -> FuOutput {
        let op = input.ctrl.msg.op;
        let en_in = input.ctrl.en;
        let mut out = FuOutput::quiet(self.num_outports, self.num_inports);

        let is_single = op == FuOp::FMul;
        let is_binary = matches!(op, FuOp::FMulFAdd | FuOp::FMulFSub);
        let recognized =
            is_single || is_binary || matches!(op, FuOp::FMulFAddFAdd | FuOp::FMulFSubFSub);
        // The subtracting macros flip both adder stages together.
        let subtracting = matches!(op, FuOp::FMulFSub | FuOp::FMulFSubFSub);
        let add_op = if subtracting { FuOp::FSub } else { FuOp::FAdd };

        let r0 = self.fu0.eval(&stage_input(
            vec![input.lane(0), input.lane(1)],
            stage_ctrl(en_in, FuOp::FMul),
        ));
        let r1 = self.fu1.eval(&stage_input(
            vec![chained(r0.message()), input.lane(2)],
            stage_ctrl(en_in, add_op),
        ));
        let r2 = self.fu2.eval(&stage_input(
            vec![chained(r1.message()), input.lane(3)],
            stage_ctrl(en_in, add_op),
        ));

        merge_ready(&mut out, &r0, &[(0, 0), (1, 1)]);
        merge_ready(&mut out, &r1, &[(1, 2)]);
        merge_ready(&mut out, &r2, &[(1, 3)]);

        if !recognized {
            tracing::trace!(op = ?op, "seq mul-add-add: unrecognized macro-opcode");
        }
        let en = lanes_valid(input, USED_LANES) && recognized;
        // Final-output multiplexer keyed by the decoded variant.
        let msg = if is_single {
            r0.message()
        } else if is_binary {
            r1.message()
        } else {
            r2.message()
        };
        commit(input, &mut out, en, msg);
        out
    }
}
