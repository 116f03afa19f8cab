//! Compare followed by select.
//!
//! Stage 0 compares shared lanes 0 and 1; stage 1 is a select whose
//! condition is the comparison result and whose candidates are shared lanes
//! 2 and 3. The select stage is always configured to `Sel`. The output comes
//! from the compare stage for the plain relational macros and from the
//! select stage for their `-Sel` counterparts.

use crate::common::error::ConfigError;
use crate::config::FuConfig;
use crate::core::ports::{FuInput, FuOutput};
use crate::core::signals::FuOp;
use crate::core::traits::FunctionalUnit;
use crate::core::units::compare::FpCompare;
use crate::core::units::fused::{
    chained, commit, lanes_valid, merge_ready, stage_ctrl, stage_ctrl3, stage_input,
};
use crate::core::units::select::Select;

/// Shared input lanes this topology consumes.
const USED_LANES: usize = 4;

/// Sequential compare→select unit.
#[derive(Debug)]
pub struct CompSel {
    num_inports: usize,
    num_outports: usize,
    fu0: FpCompare,
    fu1: Select,
}

impl CompSel {
    /// Builds the fused unit and its owned stages.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the operand layout is unsupported or
    /// fewer than four input lanes are configured.
    pub fn new(config: &FuConfig) -> Result<Self, ConfigError> {
        config.require_ports(USED_LANES, 1)?;
        Ok(Self {
            num_inports: config.num_inports,
            num_outports: config.num_outports,
            fu0: FpCompare::new(&config.stage(2))?,
            fu1: Select::new(&config.stage(3))?,
        })
    }
}

impl FunctionalUnit for CompSel {
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

        // Priority-ordered relational decode; `recognized` is false for
        // anything outside the ten relational macros.
        let (cmp_op, recognized) = match op {
            FuOp::FEq | FuOp::FEqSel => (FuOp::Eq, true),
            FuOp::FLt | FuOp::FLtSel => (FuOp::Lt, true),
            FuOp::FLte | FuOp::FLteSel => (FuOp::Lte, true),
            FuOp::FGt | FuOp::FGtSel => (FuOp::Gt, true),
            FuOp::FGte | FuOp::FGteSel => (FuOp::Gte, true),
            _ => (FuOp::Eq, false),
        };
        let is_single = matches!(
            op,
            FuOp::FEq | FuOp::FLt | FuOp::FLte | FuOp::FGt | FuOp::FGte
        );

        let r0 = self.fu0.eval(&stage_input(
            vec![input.lane(0), input.lane(1)],
            stage_ctrl(en_in, cmp_op),
        ));
        let r1 = self.fu1.eval(&stage_input(
            vec![chained(r0.message()), input.lane(2), input.lane(3)],
            stage_ctrl3(en_in, FuOp::Sel),
        ));

        merge_ready(&mut out, &r0, &[(0, 0), (1, 1)]);
        merge_ready(&mut out, &r1, &[(1, 2), (2, 3)]);

        if !recognized {
            tracing::trace!(op = ?op, "comp-sel: unrecognized macro-opcode");
        }
        let en = lanes_valid(input, USED_LANES) && recognized;
        let msg = if is_single { r0.message() } else { r1.message() };
        commit(input, &mut out, en, msg);
        out
    }
}
