//! Mul∥add→add unit tests.
//!
//! The product of lanes 0 and 1 and the sum of lanes 2 and 3 are computed
//! side by side and combined; the output always comes from the combining
//! stage.

use crate::common::harness::{Cycle, b2f};
use cgrasim_core::FuConfig;
use cgrasim_core::core::FunctionalUnit;
use cgrasim_core::core::signals::FuOp;
use cgrasim_core::core::units::fused::PrlMulAddAdder;
use rstest::rstest;

fn unit() -> PrlMulAddAdder {
    PrlMulAddAdder::new(&FuConfig::default()).unwrap()
}

#[rstest]
// (2*3) + (5+7)
#[case(FuOp::FMulFAdd, 18.0)]
#[case(FuOp::FMulFAddFAdd, 18.0)]
// (2*3) - (5+7)
#[case(FuOp::FMulFSub, -6.0)]
#[case(FuOp::FMulFSubFSub, -6.0)]
fn combines_the_parallel_results(#[case] op: FuOp, #[case] expect: f64) {
    let input = Cycle::new(op, 4).lanes(&[2.0, 3.0, 5.0, 7.0]).build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), expect, "{op:?}");
}

/// The single multiply macro still flows through the combining adder; unused
/// lanes are scheduled with zero operands.
#[test]
fn single_multiply_flows_through_the_combiner() {
    let input = Cycle::new(FuOp::FMul, 4).lanes(&[2.0, 3.0, 0.0, 0.0]).build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 6.0);
}

#[test]
fn unrecognized_macro_deasserts_every_output() {
    let input = Cycle::new(FuOp::PhiFAdd, 4)
        .lanes(&[2.0, 3.0, 5.0, 7.0])
        .build();
    let out = unit().eval(&input);
    assert!(out.ports.iter().all(|port| !port.en));
}

#[test]
fn parallel_stages_consume_disjoint_lanes() {
    let input = Cycle::new(FuOp::FMulFAdd, 4)
        .lanes(&[2.0, 3.0, 5.0, 7.0])
        .build();
    let out = unit().eval(&input);
    assert_eq!(out.lane_ready, vec![true, true, true, true]);
}

#[test]
fn starved_adder_lane_poisons_the_combined_result() {
    let input = Cycle::new(FuOp::FMulFAdd, 4)
        .lanes(&[2.0, 3.0, 5.0, 7.0])
        .lane_count(3, 0)
        .build();
    let out = unit().eval(&input);
    assert!(!out.result().unwrap().predicate);
    assert!(!out.lane_ready[2]);
    assert!(!out.lane_ready[3]);
}
