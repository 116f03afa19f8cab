//! Operand bit layout and field slicing.
//!
//! Every functional unit carries operand payloads as fixed-width bit patterns:
//! one sign bit on top, `exp_nbits` exponent bits below it, and `sig_nbits`
//! significand bits at the bottom. This module performs the following:
//! 1. **Layout Validation:** Construction-time checks of the configured widths.
//! 2. **Field Slicing:** Sign/exponent/significand extraction by shift and mask.
//! 3. **Value Conversion:** `f64` encode/decode used by the arithmetic model
//!    and by trace generation (round-to-nearest-even, subnormals, overflow to
//!    infinity, NaN canonicalization).

use crate::common::error::ConfigError;

/// Fraction bit count of an IEEE 754 double.
const F64_SIG_BITS: u32 = 52;

/// Biased-exponent mask of an IEEE 754 double.
const F64_EXP_MASK: u64 = 0x7ff;

const fn mask(nbits: u32) -> u64 {
    if nbits >= 64 {
        u64::MAX
    } else {
        (1u64 << nbits) - 1
    }
}

/// Bit layout of one floating-point operand payload.
///
/// Fixed per unit instance at construction; the payload width is always
/// `1 + exp_nbits + sig_nbits`. Field positions are mandatory for trace
/// compatibility: sign at the top bit, exponent next, significand at the
/// bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloatLayout {
    exp_nbits: u32,
    sig_nbits: u32,
}

impl FloatLayout {
    /// Widest supported payload. Layouts are capped at single precision so
    /// that every representable value round-trips exactly through `f64`.
    pub const MAX_PAYLOAD_BITS: u32 = 32;

    /// Creates a layout, rejecting widths outside the supported range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedLayout`] unless
    /// `2 <= exp_nbits <= 8` and `1 <= sig_nbits <= 23`.
    pub const fn new(exp_nbits: u32, sig_nbits: u32) -> Result<Self, ConfigError> {
        if exp_nbits < 2 || exp_nbits > 8 || sig_nbits < 1 || sig_nbits > 23 {
            return Err(ConfigError::UnsupportedLayout {
                exp_nbits,
                sig_nbits,
            });
        }
        Ok(Self {
            exp_nbits,
            sig_nbits,
        })
    }

    /// Configured exponent field width.
    pub const fn exp_nbits(self) -> u32 {
        self.exp_nbits
    }

    /// Configured significand field width.
    pub const fn sig_nbits(self) -> u32 {
        self.sig_nbits
    }

    /// Total payload width: `1 + exp_nbits + sig_nbits`.
    pub const fn payload_bits(self) -> u32 {
        1 + self.exp_nbits + self.sig_nbits
    }

    /// Mask covering the whole payload.
    pub const fn payload_mask(self) -> u64 {
        mask(self.payload_bits())
    }

    /// Mask selecting the sign bit in place.
    pub const fn sign_mask(self) -> u64 {
        1u64 << (self.exp_nbits + self.sig_nbits)
    }

    /// Mask covering the significand field (in the low bits).
    pub const fn sig_mask(self) -> u64 {
        mask(self.sig_nbits)
    }

    /// Sign bit of a payload.
    pub const fn sign(self, bits: u64) -> bool {
        bits & self.sign_mask() != 0
    }

    /// Biased exponent field of a payload.
    pub const fn exponent(self, bits: u64) -> u64 {
        (bits >> self.sig_nbits) & mask(self.exp_nbits)
    }

    /// Significand (fraction) field of a payload.
    pub const fn significand(self, bits: u64) -> u64 {
        bits & self.sig_mask()
    }

    /// Exponent bias: `2^(exp_nbits - 1) - 1`.
    pub const fn bias(self) -> i64 {
        (1i64 << (self.exp_nbits - 1)) - 1
    }

    /// Positive infinity: exponent all ones, significand zero.
    pub const fn infinity(self) -> u64 {
        mask(self.exp_nbits) << self.sig_nbits
    }

    /// Canonical quiet NaN: exponent all ones, significand MSB set, sign clear.
    pub const fn quiet_nan(self) -> u64 {
        self.infinity() | 1u64 << (self.sig_nbits - 1)
    }

    /// Decodes a payload into the `f64` value it represents.
    ///
    /// Exact for every supported layout (payloads are at most single
    /// precision). NaN payloads decode to an `f64` NaN.
    pub fn decode(self, bits: u64) -> f64 {
        let negative = self.sign(bits);
        let exp = self.exponent(bits);
        let frac = self.significand(bits);
        let m = i32::try_from(self.sig_nbits).unwrap_or(i32::MAX);
        let bias = self.bias() as i32;

        let magnitude = if exp == mask(self.exp_nbits) {
            if frac == 0 {
                f64::INFINITY
            } else {
                f64::NAN
            }
        } else if exp == 0 {
            // Subnormal: no implicit leading bit, minimum exponent.
            (frac as f64) * 2.0f64.powi(1 - bias - m)
        } else {
            let mant = (frac | (1u64 << self.sig_nbits)) as f64;
            mant * 2.0f64.powi(exp as i32 - bias - m)
        };
        if negative { -magnitude } else { magnitude }
    }

    /// Encodes an `f64` into this layout, rounding to nearest-even.
    ///
    /// Values beyond the largest finite encoding become infinity, values
    /// below the smallest subnormal round to (signed) zero, and NaN becomes
    /// the canonical quiet NaN.
    pub fn encode(self, value: f64) -> u64 {
        let sign_bit = if value.is_sign_negative() {
            self.sign_mask()
        } else {
            0
        };
        if value.is_nan() {
            return self.quiet_nan();
        }
        if value.is_infinite() {
            return sign_bit | self.infinity();
        }
        if value == 0.0 {
            return sign_bit;
        }

        let m = i64::from(self.sig_nbits);
        let bias = self.bias();
        let min_norm_exp = 1 - bias;

        // Decompose |value| into sig * 2^exp with an integer significand.
        let bits = value.abs().to_bits();
        let raw_exp = ((bits >> F64_SIG_BITS) & F64_EXP_MASK) as i64;
        let raw_sig = bits & mask(F64_SIG_BITS);
        let (sig, exp) = if raw_exp == 0 {
            (raw_sig, -1074i64)
        } else {
            (raw_sig | (1u64 << F64_SIG_BITS), raw_exp - 1075)
        };

        let top = 63 - i64::from(sig.leading_zeros());
        // Fraction bits representable at this magnitude: the full field for
        // normals, progressively fewer once the exponent sinks below the
        // normal range.
        let keep = if exp + top >= min_norm_exp {
            m
        } else {
            m - (min_norm_exp - exp - top)
        };

        let drop = top - keep;
        let (rounded, rexp) = if drop <= 0 {
            (sig << u32::try_from(-drop).unwrap_or(0), exp + drop)
        } else if drop > 63 {
            (0, exp + drop)
        } else {
            let shift = u32::try_from(drop).unwrap_or(0);
            let kept = sig >> shift;
            let rem = sig & mask(shift);
            let half = 1u64 << (shift - 1);
            let round_up = rem > half || (rem == half && kept & 1 == 1);
            (kept + u64::from(round_up), exp + drop)
        };
        if rounded == 0 {
            return sign_bit;
        }

        let rtop = 63 - i64::from(rounded.leading_zeros());
        let rexp_unbiased = rexp + rtop;
        if rexp_unbiased > bias {
            return sign_bit | self.infinity();
        }
        if rexp_unbiased >= min_norm_exp {
            // Normal: align the leading bit to position sig_nbits.
            let frac = if rtop >= m {
                rounded >> u32::try_from(rtop - m).unwrap_or(0)
            } else {
                rounded << u32::try_from(m - rtop).unwrap_or(0)
            } & self.sig_mask();
            let biased = (rexp_unbiased + bias) as u64;
            sign_bit | (biased << self.sig_nbits) | frac
        } else {
            // Subnormal: exponent field zero, fraction scaled to the fixed
            // minimum exponent. The shift is exact; rounding already happened.
            let sh = rexp - (min_norm_exp - m);
            let frac = if sh >= 0 {
                rounded << u32::try_from(sh).unwrap_or(0)
            } else {
                rounded >> u32::try_from(-sh).unwrap_or(0)
            };
            sign_bit | (frac & self.sig_mask())
        }
    }
}
