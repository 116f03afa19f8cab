//! Configuration system for the tile simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! functional units. It provides:
//! 1. **Defaults:** The baseline unit shape (operand layout, port counts).
//! 2. **Structures:** The per-unit configuration fixed at construction.
//! 3. **Validation:** Construction-time checks; a bad configuration never
//!    survives into per-cycle evaluation.
//!
//! Configuration is supplied via JSON from the surrounding tooling or use
//! `FuConfig::default()` for the reference shape.

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::common::float::FloatLayout;

/// Default configuration constants for the functional units.
///
/// These values define the reference unit shape when not explicitly
/// overridden in JSON configuration.
mod defaults {
    /// Exponent field width of the operand payload.
    pub const EXP_NBITS: u32 = 4;

    /// Significand field width of the operand payload.
    pub const SIG_NBITS: u32 = 11;

    /// Operand input lanes per unit.
    pub const NUM_INPORTS: usize = 4;

    /// Result output ports per unit.
    pub const NUM_OUTPORTS: usize = 2;
}

/// Per-unit configuration, fixed for the unit's lifetime.
///
/// The operand payload width is always `1 + exp_nbits + sig_nbits`; a
/// mismatched layout is a construction-time failure, never a per-cycle one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuConfig {
    /// Exponent field width of the operand payload.
    pub exp_nbits: u32,
    /// Significand field width of the operand payload.
    pub sig_nbits: u32,
    /// Operand input lanes.
    pub num_inports: usize,
    /// Result output ports.
    pub num_outports: usize,
}

impl Default for FuConfig {
    fn default() -> Self {
        Self {
            exp_nbits: defaults::EXP_NBITS,
            sig_nbits: defaults::SIG_NBITS,
            num_inports: defaults::NUM_INPORTS,
            num_outports: defaults::NUM_OUTPORTS,
        }
    }
}

impl FuConfig {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the underlying
    /// validation error for a well-formed but invalid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configured operand layout and port geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = self.layout()?;
        self.require_ports(2, 1)
    }

    /// The operand bit layout this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedLayout`] for out-of-range widths.
    pub fn layout(&self) -> Result<FloatLayout, ConfigError> {
        FloatLayout::new(self.exp_nbits, self.sig_nbits)
    }

    /// Checks the port geometry against a unit topology's requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooFewInports`] or
    /// [`ConfigError::TooFewOutports`].
    pub fn require_ports(&self, inports: usize, outports: usize) -> Result<(), ConfigError> {
        if self.num_inports < inports {
            return Err(ConfigError::TooFewInports {
                required: inports,
                configured: self.num_inports,
            });
        }
        if self.num_outports < outports {
            return Err(ConfigError::TooFewOutports {
                required: outports,
                configured: self.num_outports,
            });
        }
        Ok(())
    }

    /// Configuration for an internal stage of a fused unit: same operand
    /// layout, narrowed to the stage's own lane count and a single output.
    pub const fn stage(&self, lanes: usize) -> Self {
        Self {
            num_inports: lanes,
            num_outports: 1,
            exp_nbits: self.exp_nbits,
            sig_nbits: self.sig_nbits,
        }
    }
}
