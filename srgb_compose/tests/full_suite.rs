// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! End-to-end runs of the composition check, as the check binary performs
//! them.

use srgb_compose::compose::{BUFFER_INIT8, srgb_kernel};
use srgb_compose::properties::{Property, SweepConfig};
use srgb_compose::runner::{run, run_srgb};
use srgb_compose::{compose, compose_unclamped};

#[test]
fn full_suite_passes() {
    let mut out = Vec::new();
    let summary = run_srgb(&SweepConfig::default(), &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert_eq!(summary.failure_count(), 0);
    assert_eq!(summary.exit_status(), 0);
    assert!(!report.contains("FAIL"));
    for property in Property::ALL {
        assert!(report.contains(&format!(
            "Property {}: {}\n  PASS",
            property.number(),
            property.title()
        )));
    }
    assert!(report.contains("All 33 tests passed."));
    assert!(report.contains("All formula properties verified."));
    assert!(report.ends_with("SUCCESS: All tests passed.\n"));
}

#[test]
fn report_is_deterministic() {
    let render = || {
        let mut out = Vec::new();
        run_srgb(&SweepConfig::default(), &mut out).unwrap();
        out
    };
    assert_eq!(render(), render());
}

#[test]
fn removing_the_clamp_is_caught() {
    let mut out = Vec::new();
    let summary = run(compose_unclamped, &SweepConfig::default(), &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert!(!summary.is_success());
    assert_ne!(summary.exit_status(), 0);
    let range = summary
        .properties
        .iter()
        .find(|p| p.property == Property::RangeClosure)
        .unwrap();
    assert!(!range.passed());
    assert!(report.contains("FAIL [18]: 250 + 240 = 490 clamps"));
    assert!(report.contains("  compose(250, 10, 250) = 490, expected 255"));
    assert!(report.contains("FAILURE: "));
}

#[test]
fn range_closure_holds_exhaustively() {
    let mut out = Vec::new();
    let config = SweepConfig::exhaustive();
    let tally = srgb_compose::properties::check_property(
        Property::RangeClosure,
        &srgb_kernel,
        &config,
        &mut out,
    )
    .unwrap();
    assert_eq!(tally.samples, 256 * 256 * 256);
    assert!(tally.passed());
}

#[test]
fn documented_values() {
    assert_eq!(compose(134, 118, 73), 173);
    assert_eq!(compose(194, 140, 73), 227);
    assert_eq!(compose(249, 242, 73), 253);
    assert_eq!(compose(128, 128, 128), 192);
    assert_eq!(compose(0, 128, 255), 127);
    assert_eq!(compose(0, 254, 255), 1);
    assert_eq!(compose(0, 128, BUFFER_INIT8), 36);
}
