//! Arithmetic-primitive model tests.
//!
//! The `SoftFpu` model stands in for the bit-exact hardware primitive; these
//! tests pin its contract at the payload level: exact results where the
//! layout can represent them, rounding where it cannot, and saturation to
//! infinity on overflow.

use crate::common::harness::{b2f, f2b, layout};
use cgrasim_core::core::units::fpu::{FpPrimitive, SoftFpu};

#[test]
fn adds_exact_payloads() {
    let fpu = SoftFpu;
    assert_eq!(b2f(fpu.add(layout(), f2b(1.0), f2b(2.0))), 3.0);
    assert_eq!(b2f(fpu.add(layout(), f2b(-1.5), f2b(0.5))), -1.0);
}

#[test]
fn subtracts_exact_payloads() {
    let fpu = SoftFpu;
    assert_eq!(b2f(fpu.sub(layout(), f2b(2.0), f2b(3.0))), -1.0);
}

#[test]
fn multiplies_exact_payloads() {
    let fpu = SoftFpu;
    assert_eq!(b2f(fpu.mul(layout(), f2b(2.0), f2b(3.0))), 6.0);
    assert_eq!(b2f(fpu.mul(layout(), f2b(-2.0), f2b(3.0))), -6.0);
}

#[test]
fn rounds_results_to_the_layout() {
    let fpu = SoftFpu;
    // 1/3 is not representable in 11 significand bits; the product rounds.
    let third = f2b(1.0 / 3.0);
    let one = fpu.mul(layout(), third, f2b(3.0));
    let err = (b2f(one) - 1.0).abs();
    assert!(err <= 1.0 / 2048.0, "rounding error {err} too large");
}

#[test]
fn overflow_saturates_to_infinity() {
    let fpu = SoftFpu;
    let big = f2b(250.0);
    let inf = fpu.mul(layout(), big, big);
    assert_eq!(inf, layout().infinity());
}

#[test]
fn nan_results_canonicalize() {
    let fpu = SoftFpu;
    // inf - inf has no numeric value; the model emits the canonical quiet NaN.
    let inf = layout().infinity();
    assert_eq!(fpu.sub(layout(), inf, inf), layout().quiet_nan());
}
