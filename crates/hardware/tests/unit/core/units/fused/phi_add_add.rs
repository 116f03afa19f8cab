//! Phi∥add→add unit tests.
//!
//! The merge of lanes 0 and 1 runs beside the sum of lanes 2 and 3; the
//! combining adder produces the output.

use crate::common::harness::{Cycle, b2f};
use cgrasim_core::FuConfig;
use cgrasim_core::core::FunctionalUnit;
use cgrasim_core::core::signals::FuOp;
use cgrasim_core::core::units::fused::PhiAddAdder;

fn unit() -> PhiAddAdder {
    PhiAddAdder::new(&FuConfig::default()).unwrap()
}

#[test]
fn merged_value_joins_the_sum() {
    // Lane 0 is live: phi(3, 8) = 3, combined with 5 + 7.
    let input = Cycle::new(FuOp::PhiFAddFAdd, 4)
        .lanes(&[3.0, 8.0, 5.0, 7.0])
        .build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 15.0);
    assert!(msg.predicate);
}

#[test]
fn dead_first_path_merges_the_second() {
    let input = Cycle::new(FuOp::PhiFAddFAdd, 4)
        .lanes(&[3.0, 8.0, 5.0, 7.0])
        .lane_pred(0, false)
        .build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 20.0);
    assert!(msg.predicate);
}

#[test]
fn plain_phi_macro_is_recognized() {
    let input = Cycle::new(FuOp::PhiFAdd, 4)
        .lanes(&[3.0, 8.0, 5.0, 0.0])
        .build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 8.0);
}

#[test]
fn no_live_path_kills_the_combined_predicate() {
    let input = Cycle::new(FuOp::PhiFAddFAdd, 4)
        .lanes(&[3.0, 8.0, 5.0, 7.0])
        .lane_pred(0, false)
        .lane_pred(1, false)
        .build();
    let msg = unit().eval(&input).result().unwrap();
    // The merge emitted a dead zero; the sum proceeds but the result
    // predicate is poisoned.
    assert_eq!(b2f(msg.payload), 12.0);
    assert!(!msg.predicate);
}

#[test]
fn unrecognized_macro_deasserts_every_output() {
    let input = Cycle::new(FuOp::FAddFAdd, 4)
        .lanes(&[3.0, 8.0, 5.0, 7.0])
        .build();
    let out = unit().eval(&input);
    assert!(out.ports.iter().all(|port| !port.en));
}
