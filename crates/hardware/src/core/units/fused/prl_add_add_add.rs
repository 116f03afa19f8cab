//! Two adders in parallel followed by an adder.
//!
//! Stage 0 adds shared lanes 0 and 1 while stage 1 adds shared lanes 2 and
//! 3; stage 2 combines the two sums. The output is always taken from the
//! combining stage. Shorter macros still flow through the full tree: unused
//! lanes are scheduled with zero operands, which are additive identities.
//!
//! Decode debt carried over from the reference behavior: `FSub` is a
//! recognized macro but every stage is wired to plain addition; the negate
//! sub-decode remains unimplemented.

use crate::common::error::ConfigError;
use crate::config::FuConfig;
use crate::core::ports::{FuInput, FuOutput};
use crate::core::signals::FuOp;
use crate::core::traits::FunctionalUnit;
use crate::core::units::add::FpAdd;
use crate::core::units::fused::{chained, commit, lanes_valid, merge_ready, stage_ctrl, stage_input};

/// Shared input lanes this topology consumes.
const USED_LANES: usize = 4;

/// Parallel add∥add→add unit.
#[derive(Debug)]
pub struct PrlAddAddAdder {
    num_inports: usize,
    num_outports: usize,
    fu0: FpAdd,
    fu1: FpAdd,
    fu2: FpAdd,
}

impl PrlAddAddAdder {
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
            fu0: FpAdd::new(&stage_cfg)?,
            fu1: FpAdd::new(&stage_cfg)?,
            fu2: FpAdd::new(&stage_cfg)?,
        })
    }
}

impl FunctionalUnit for PrlAddAddAdder {
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

        let recognized = matches!(
            op,
            FuOp::FAdd | FuOp::FSub | FuOp::FAddFAdd | FuOp::FAddFAddFAdd
        );

        let r0 = self.fu0.eval(&stage_input(
            vec![input.lane(0), input.lane(1)],
            stage_ctrl(en_in, FuOp::FAdd),
        ));
        let r1 = self.fu1.eval(&stage_input(
            vec![input.lane(2), input.lane(3)],
            stage_ctrl(en_in, FuOp::FAdd),
        ));
        let r2 = self.fu2.eval(&stage_input(
            vec![chained(r0.message()), chained(r1.message())],
            stage_ctrl(en_in, FuOp::FAdd),
        ));

        merge_ready(&mut out, &r0, &[(0, 0), (1, 1)]);
        merge_ready(&mut out, &r1, &[(0, 2), (1, 3)]);

        if !recognized {
            tracing::trace!(op = ?op, "prl add-add-add: unrecognized macro-opcode");
        }
        let en = lanes_valid(input, USED_LANES) && recognized;
        commit(input, &mut out, en, r2.message());
        out
    }
}
