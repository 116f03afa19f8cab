//! Adder/subtractor unit tests.
//!
//! Covers the four decoded opcodes, delegation to the arithmetic primitive
//! (checked against a mocked collaborator), the constant-lane predicate
//! asymmetry, starvation, and the unrecognized-opcode policy.

use std::fmt;

use crate::common::harness::{Cycle, b2f, f2b};
use cgrasim_core::FuConfig;
use cgrasim_core::common::float::FloatLayout;
use cgrasim_core::core::FunctionalUnit;
use cgrasim_core::core::signals::FuOp;
use cgrasim_core::core::units::add::FpAdd;
use cgrasim_core::core::units::fpu::FpPrimitive;
use mockall::mock;
use mockall::predicate::eq;

mock! {
    Fpu {}
    impl FpPrimitive for Fpu {
        fn add(&self, layout: FloatLayout, a: u64, b: u64) -> u64;
        fn sub(&self, layout: FloatLayout, a: u64, b: u64) -> u64;
        fn mul(&self, layout: FloatLayout, a: u64, b: u64) -> u64;
    }
}

impl fmt::Debug for MockFpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MockFpu")
    }
}

fn unit() -> FpAdd {
    FpAdd::new(&FuConfig::default()).unwrap()
}

#[test]
fn adds_the_selected_lanes() {
    let input = Cycle::new(FuOp::FAdd, 4).lanes(&[1.5, 2.25]).build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 3.75);
    assert!(msg.predicate);
}

#[test]
fn subtracts_the_selected_lanes() {
    let input = Cycle::new(FuOp::FSub, 4).lanes(&[5.0, 2.0]).build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 3.0);
}

#[test]
fn selectors_route_operands() {
    // Swap the operand order through the source selectors.
    let input = Cycle::new(FuOp::FSub, 4)
        .lanes(&[2.0, 5.0])
        .selectors(&[2, 1, 0, 0])
        .build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 3.0);
}

#[test]
fn add_const_takes_the_constant_lane() {
    let input = Cycle::new(FuOp::FAddConst, 4)
        .lanes(&[4.0, 99.0])
        .constant(0.5, true)
        .build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 4.5);
}

#[test]
fn const_variant_predicate_follows_first_operand() {
    let input = Cycle::new(FuOp::FSubConst, 4)
        .lanes(&[4.0, 0.0])
        .lane_pred(1, false)
        .constant(1.0, false)
        .build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 3.0);
    assert!(msg.predicate);
}

#[test]
fn starved_lane_kills_the_predicate() {
    let input = Cycle::new(FuOp::FAdd, 4)
        .lanes(&[1.0, 2.0])
        .lane_count(0, 0)
        .build();
    let out = unit().eval(&input);
    assert!(!out.result().unwrap().predicate);
    assert!(!out.lane_ready[0]);
    assert!(!out.lane_ready[1]);
}

#[test]
fn unrecognized_opcode_withholds_outputs() {
    let input = Cycle::new(FuOp::Lt, 4).lanes(&[1.0, 2.0]).build();
    let out = unit().eval(&input);
    assert!(out.result().is_none());
}

#[test]
fn idle_cycle_produces_nothing_and_consumes_nothing() {
    let input = Cycle::new(FuOp::FAdd, 4).lanes(&[1.0, 2.0]).no_ctrl().build();
    let out = unit().eval(&input);
    assert!(out.result().is_none());
    assert!(out.lane_ready.iter().all(|ready| !ready));
}

#[test]
fn delegates_to_the_arithmetic_primitive() {
    let config = FuConfig::default();
    let layout = config.layout().unwrap();
    let mut fpu = MockFpu::new();
    let _ = fpu
        .expect_add()
        .with(eq(layout), eq(f2b(1.0)), eq(f2b(2.0)))
        .times(1)
        .return_const(f2b(9.0));
    let mut unit = FpAdd::with_primitive(&config, Box::new(fpu)).unwrap();

    let input = Cycle::new(FuOp::FAdd, 4).lanes(&[1.0, 2.0]).build();
    let msg = unit.eval(&input).result().unwrap();
    assert_eq!(msg.payload, f2b(9.0));
}
