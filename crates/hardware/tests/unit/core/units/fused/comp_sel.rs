//! Compare→select unit tests.
//!
//! The plain relational macros surface the comparison itself; the `-Sel`
//! macros route it into the select stage, which picks between shared lanes
//! 2 and 3.

use crate::common::harness::{Cycle, b2f};
use cgrasim_core::FuConfig;
use cgrasim_core::core::FunctionalUnit;
use cgrasim_core::core::signals::FuOp;
use cgrasim_core::core::units::fused::CompSel;
use rstest::rstest;

fn unit() -> CompSel {
    CompSel::new(&FuConfig::default()).unwrap()
}

#[rstest]
#[case(FuOp::FEq, 2.0, 2.0, 1)]
#[case(FuOp::FEq, 2.0, 3.0, 0)]
#[case(FuOp::FLt, 2.0, 3.0, 1)]
#[case(FuOp::FLt, 3.0, 2.0, 0)]
#[case(FuOp::FLte, 2.0, 2.0, 1)]
#[case(FuOp::FGt, 3.0, 2.0, 1)]
#[case(FuOp::FGte, 2.0, 3.0, 0)]
fn plain_relationals_surface_the_comparison(
    #[case] op: FuOp,
    #[case] a: f64,
    #[case] b: f64,
    #[case] expect: u64,
) {
    let input = Cycle::new(op, 4).lanes(&[a, b, 7.0, 9.0]).build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(msg.payload, expect, "{op:?}({a}, {b})");
    assert!(msg.predicate);
}

#[rstest]
// True comparison picks lane 2, false comparison picks lane 3.
#[case(FuOp::FLtSel, 2.0, 3.0, 7.0)]
#[case(FuOp::FLtSel, 3.0, 2.0, 9.0)]
#[case(FuOp::FEqSel, 2.0, 2.0, 7.0)]
#[case(FuOp::FEqSel, 2.0, 3.0, 9.0)]
#[case(FuOp::FGteSel, 3.0, 2.0, 7.0)]
#[case(FuOp::FGteSel, 2.0, 3.0, 9.0)]
fn select_macros_route_the_candidates(
    #[case] op: FuOp,
    #[case] a: f64,
    #[case] b: f64,
    #[case] expect: f64,
) {
    let input = Cycle::new(op, 4).lanes(&[a, b, 7.0, 9.0]).build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), expect, "{op:?}({a}, {b})");
    assert!(msg.predicate);
}

#[test]
fn select_predicate_follows_the_chosen_candidate() {
    let input = Cycle::new(FuOp::FLtSel, 4)
        .lanes(&[2.0, 3.0, 7.0, 9.0])
        .lane_pred(3, false)
        .build();
    // Lane 2 is chosen; the dead predicate on lane 3 must not matter.
    assert!(unit().eval(&input).result().unwrap().predicate);

    let input = Cycle::new(FuOp::FLtSel, 4)
        .lanes(&[2.0, 3.0, 7.0, 9.0])
        .lane_pred(2, false)
        .build();
    assert!(!unit().eval(&input).result().unwrap().predicate);
}

#[test]
fn comparison_predicate_poisons_the_selection() {
    let input = Cycle::new(FuOp::FLtSel, 4)
        .lanes(&[2.0, 3.0, 7.0, 9.0])
        .lane_pred(1, false)
        .build();
    let msg = unit().eval(&input).result().unwrap();
    assert_eq!(b2f(msg.payload), 7.0);
    assert!(!msg.predicate);
}

#[test]
fn all_shared_lanes_are_released() {
    let input = Cycle::new(FuOp::FLtSel, 4)
        .lanes(&[2.0, 3.0, 7.0, 9.0])
        .build();
    let out = unit().eval(&input);
    assert_eq!(out.lane_ready, vec![true, true, true, true]);
}

#[test]
fn plain_relationals_still_release_the_candidate_lanes() {
    // The select stage runs every cycle regardless of the decoded variant.
    let input = Cycle::new(FuOp::FLt, 4).lanes(&[2.0, 3.0, 7.0, 9.0]).build();
    let out = unit().eval(&input);
    assert_eq!(out.lane_ready, vec![true, true, true, true]);
}

#[test]
fn unrecognized_macro_deasserts_every_output() {
    let input = Cycle::new(FuOp::Lt, 4).lanes(&[2.0, 3.0, 7.0, 9.0]).build();
    let out = unit().eval(&input);
    assert!(out.ports.iter().all(|port| !port.en));
}
