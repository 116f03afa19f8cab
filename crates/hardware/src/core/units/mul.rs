//! Floating-point multiplier unit.
//!
//! Decodes `FMul` and its constant-lane variant; same operand selection,
//! predicate, and starvation discipline as the adder, with the product
//! computed by the [`FpPrimitive`] collaborator.

use crate::common::error::ConfigError;
use crate::common::float::FloatLayout;
use crate::config::FuConfig;
use crate::core::ports::{FuInput, FuOutput, OperandMsg};
use crate::core::signals::FuOp;
use crate::core::traits::FunctionalUnit;
use crate::core::units::fpu::{FpPrimitive, SoftFpu};
use crate::core::units::{broadcast, select_operands, starved};

/// Floating-point multiplier unit.
#[derive(Debug)]
pub struct FpMul {
    layout: FloatLayout,
    num_inports: usize,
    num_outports: usize,
    fpu: Box<dyn FpPrimitive>,
}

impl FpMul {
    /// Builds a multiplier backed by the default [`SoftFpu`] model.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the operand layout is unsupported or
    /// the port geometry is too small for a two-operand unit.
    pub fn new(config: &FuConfig) -> Result<Self, ConfigError> {
        Self::with_primitive(config, Box::new(SoftFpu))
    }

    /// Builds a multiplier backed by a caller-supplied arithmetic primitive.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::new`].
    pub fn with_primitive(
        config: &FuConfig,
        fpu: Box<dyn FpPrimitive>,
    ) -> Result<Self, ConfigError> {
        let layout = config.layout()?;
        config.require_ports(2, 1)?;
        Ok(Self {
            layout,
            num_inports: config.num_inports,
            num_outports: config.num_outports,
            fpu,
        })
    }
}

impl FunctionalUnit for FpMul {
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

        let from_const = match ctrl.msg.op {
            FuOp::FMul => false,
            FuOp::FMulConst => true,
            op => {
                tracing::trace!(op = ?op, "mul: unrecognized opcode, outputs withheld");
                return out;
            }
        };

        let lane_a = input.lane(in0);
        let lane_b = input.lane(in1);
        let a = lane_a.msg.payload;
        let b = if from_const {
            input.constant.payload
        } else {
            lane_b.msg.payload
        };

        let payload = self.fpu.mul(self.layout, a, b);

        let mut predicate = lane_a.msg.predicate && lane_b.msg.predicate;
        if starved(input, &mut out, in0, in1) {
            predicate = false;
        }
        if from_const {
            predicate = lane_a.msg.predicate;
        }
        if ctrl.msg.predicate {
            predicate = predicate && input.ext_predicate.predicate;
        }

        broadcast(&mut out, ctrl.en, OperandMsg::new(payload, predicate));
        out
    }
}
