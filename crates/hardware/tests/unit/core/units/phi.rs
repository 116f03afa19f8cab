//! Phi (control-flow merge) unit tests.

use crate::common::harness::{Cycle, b2f};
use cgrasim_core::FuConfig;
use cgrasim_core::core::FunctionalUnit;
use cgrasim_core::core::signals::FuOp;
use cgrasim_core::core::units::phi::Phi;

fn unit() -> Phi {
    Phi::new(&FuConfig::default()).unwrap()
}

#[test]
fn first_live_path_wins() {
    let input = Cycle::new(FuOp::Phi, 4).lanes(&[3.0, 8.0]).build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 3.0);
    assert!(msg.predicate);
}

#[test]
fn dead_first_path_falls_through_to_the_second() {
    let input = Cycle::new(FuOp::Phi, 4)
        .lanes(&[3.0, 8.0])
        .lane_pred(0, false)
        .build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 8.0);
    assert!(msg.predicate);
}

#[test]
fn no_live_path_produces_a_dead_zero() {
    let input = Cycle::new(FuOp::Phi, 4)
        .lanes(&[3.0, 8.0])
        .lane_pred(0, false)
        .lane_pred(1, false)
        .build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(msg.payload, 0);
    assert!(!msg.predicate);
}

#[test]
fn starved_lane_kills_the_predicate() {
    let input = Cycle::new(FuOp::Phi, 4)
        .lanes(&[3.0, 8.0])
        .lane_count(0, 0)
        .build();
    let out = unit().eval(&input);
    assert!(!out.result().unwrap().predicate);
    assert!(!out.lane_ready[0]);
    assert!(!out.lane_ready[1]);
}

#[test]
fn unrecognized_opcode_withholds_outputs() {
    let input = Cycle::new(FuOp::Sel, 4).lanes(&[3.0, 8.0]).build();
    assert!(unit().eval(&input).result().is_none());
}
