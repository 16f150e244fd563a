// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::Write;

use crate::{
    compose::srgb_kernel,
    error::Result,
    properties::{PropertyTally, SweepConfig, verify_properties},
    report::Tally,
    util::tracing_wrappers::*,
    vectors::{VECTORS, run_vectors},
};

const RULE: &str = "============================================================";

/// Outcome of one run of the vector suite and the property sweeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub vectors: Tally,
    pub properties: Vec<PropertyTally>,
}

impl RunSummary {
    /// Failing vectors plus every property violation.
    pub fn failure_count(&self) -> usize {
        self.vectors.failed + self.properties.iter().map(|p| p.violations).sum::<usize>()
    }

    /// Failing vectors plus failing properties, each property counted once.
    pub fn failing_checks(&self) -> usize {
        self.vectors.failed + self.properties.iter().filter(|p| !p.passed()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Process exit status: 0 on success, otherwise the number of failing
    /// checks saturated into `1..=255`.
    pub fn exit_status(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            self.failing_checks().clamp(1, u8::MAX as usize) as u8
        }
    }
}

/// Runs the curated vectors and then the property sweeps against `kernel`,
/// writing the full report to `out`.
pub fn run<K, W>(kernel: K, config: &SweepConfig, out: &mut W) -> Result<RunSummary>
where
    K: Fn(u8, u8, u8) -> u32,
    W: Write,
{
    writeln!(out, "sRGB composition check for palette images with tRNS")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;

    let vectors = run_vectors(&VECTORS, &kernel, out)?;
    writeln!(out)?;
    let properties = verify_properties(&kernel, config, out)?;
    let summary = RunSummary {
        vectors,
        properties,
    };

    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    if summary.is_success() {
        writeln!(out, "SUCCESS: All tests passed.")?;
    } else {
        writeln!(out, "FAILURE: {} test(s) failed.", summary.failure_count())?;
    }
    debug!(
        failures = summary.failure_count(),
        failing_checks = summary.failing_checks(),
        "composition check finished"
    );
    Ok(summary)
}

/// [`run`] for the production kernel.
pub fn run_srgb<W: Write>(config: &SweepConfig, out: &mut W) -> Result<RunSummary> {
    run(srgb_kernel, config, out)
}
