//! Configuration error definitions.
//!
//! This module defines the error handling for the simulator's construction
//! phase. It provides:
//! 1. **Configuration Errors:** Bit-width and port-count violations raised at
//!    unit construction or schedule elaboration, never per cycle.
//! 2. **Error Handling:** Integration with standard Rust error traits for
//!    system-level reporting.
//!
//! Runtime conditions deliberately have no error type: an unrecognized opcode
//! deasserts every output enable for the cycle, and a starved operand lane
//! surfaces as a false result predicate. Both are in-band outcomes the
//! surrounding schedule is expected to absorb.

use thiserror::Error;

/// Construction-time configuration failure.
///
/// Raised when a unit is built or a schedule is elaborated against an invalid
/// configuration. These are fatal to elaboration and never tolerated silently.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Operand layout outside the supported field widths.
    #[error(
        "unsupported operand layout: {exp_nbits} exponent / {sig_nbits} significand bits \
         (supported: 2-8 exponent, 1-23 significand)"
    )]
    UnsupportedLayout {
        /// Configured exponent field width.
        exp_nbits: u32,
        /// Configured significand field width.
        sig_nbits: u32,
    },

    /// Unit instantiated with fewer input lanes than its topology consumes.
    #[error("unit requires at least {required} input lanes, {configured} configured")]
    TooFewInports {
        /// Lanes the unit's topology consumes.
        required: usize,
        /// Lanes the configuration provides.
        configured: usize,
    },

    /// Unit instantiated with no output ports.
    #[error("unit requires at least {required} output ports, {configured} configured")]
    TooFewOutports {
        /// Ports the unit's topology drives.
        required: usize,
        /// Ports the configuration provides.
        configured: usize,
    },

    /// Control-message operand selector addressing a lane that does not exist.
    #[error("operand source selector {selector} out of range for {lanes} input lanes")]
    SelectorOutOfRange {
        /// Offending one-based selector value.
        selector: u8,
        /// Configured input lane count.
        lanes: usize,
    },

    /// Malformed JSON configuration text.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
