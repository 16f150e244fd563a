// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Curated composition vectors with hand-computed results.

use std::io::Write;

use crate::{
    compose::{BUFFER_INIT8, Sample},
    error::Result,
    report::{FailureRecord, Tally},
    util::tracing_wrappers::*,
};

/// What a vector is meant to exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorGroup {
    /// alpha = 0: only the background survives.
    Transparent,
    /// alpha = 255: only the foreground survives.
    Opaque,
    MidAlpha,
    /// Palette entries that broke the premultiplied invariant in the wild.
    PaletteRegression,
    ClampBoundary,
    Rounding,
    /// Background is the byte output buffers are initialised with.
    DefaultBuffer,
    Stress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestVector {
    pub foreground: u8,
    pub alpha: u8,
    pub background: u8,
    pub expected: u8,
    pub description: &'static str,
    pub group: VectorGroup,
}

impl TestVector {
    const fn new(
        group: VectorGroup,
        foreground: u8,
        alpha: u8,
        background: u8,
        expected: u8,
        description: &'static str,
    ) -> Self {
        Self {
            foreground,
            alpha,
            background,
            expected,
            description,
            group,
        }
    }

    pub fn sample(&self) -> Sample {
        Sample::new(self.foreground, self.alpha, self.background)
    }
}

use VectorGroup::*;

#[rustfmt::skip]
pub static VECTORS: [TestVector; 33] = [
    TestVector::new(Transparent, 0, 0, 255, 255, "transparent black over white keeps white"),
    TestVector::new(Transparent, 255, 0, 0, 0, "transparent white over black keeps black"),
    TestVector::new(Transparent, 100, 0, 200, 200, "transparent over gray keeps gray"),
    TestVector::new(Transparent, 123, 0, 45, 45, "transparent foreground is ignored"),
    TestVector::new(Opaque, 255, 255, 0, 255, "opaque white over black is white"),
    TestVector::new(Opaque, 0, 255, 255, 0, "opaque black over white is black"),
    TestVector::new(Opaque, 100, 255, 200, 100, "opaque over gray is the foreground"),
    TestVector::new(MidAlpha, 128, 128, 128, 192, "half gray over gray: 128 + (127*128+127)/255"),
    TestVector::new(MidAlpha, 0, 128, 255, 127, "half black over white: 0 + (127*255+127)/255"),
    TestVector::new(MidAlpha, 255, 128, 0, 255, "half white over black: 255 + 0"),
    TestVector::new(MidAlpha, 100, 128, 200, 200, "half blend: 100 + (127*200+127)/255"),
    TestVector::new(MidAlpha, 60, 128, 130, 125, "half blend: 60 + (127*130+127)/255"),
    TestVector::new(PaletteRegression, 134, 118, 73, 173, "palette tRNS entry 1, foreground above alpha"),
    TestVector::new(PaletteRegression, 194, 140, 73, 227, "palette tRNS entry 2, foreground above alpha"),
    TestVector::new(PaletteRegression, 249, 242, 73, 253, "palette tRNS entry 3, foreground above alpha"),
    TestVector::new(ClampBoundary, 255, 1, 255, 255, "almost transparent white over white clamps"),
    TestVector::new(ClampBoundary, 200, 50, 200, 255, "200 + 161 = 361 clamps"),
    TestVector::new(ClampBoundary, 250, 10, 250, 255, "250 + 240 = 490 clamps"),
    TestVector::new(ClampBoundary, 128, 128, 253, 254, "one below the limit: 128 + 126"),
    TestVector::new(ClampBoundary, 128, 128, 255, 255, "exactly at the limit: 128 + 127"),
    TestVector::new(ClampBoundary, 129, 128, 255, 255, "one past the limit: 129 + 127 clamps"),
    TestVector::new(Rounding, 0, 254, 255, 1, "almost opaque: (1*255+127)/255 = 1"),
    TestVector::new(Rounding, 0, 253, 255, 2, "almost opaque: (2*255+127)/255 = 2"),
    TestVector::new(Rounding, 0, 1, 1, 1, "almost transparent, low background: (254+127)/255 = 1"),
    TestVector::new(Rounding, 0, 127, 1, 1, "128/255 rounds up"),
    TestVector::new(Rounding, 0, 128, 1, 0, "127/255 rounds down"),
    TestVector::new(DefaultBuffer, 0, 128, BUFFER_INIT8, 36, "half black over the default buffer"),
    TestVector::new(DefaultBuffer, 128, 64, BUFFER_INIT8, 183, "partial alpha over the default buffer"),
    TestVector::new(DefaultBuffer, 77, 0, BUFFER_INIT8, BUFFER_INIT8, "transparent leaves the default buffer"),
    TestVector::new(Stress, 254, 1, 254, 255, "largest blend: 254 + 253 = 507 clamps"),
    TestVector::new(Stress, 255, 254, 255, 255, "255 + 1 = 256 clamps"),
    TestVector::new(Stress, 1, 254, 1, 1, "smallest nonzero blend: 1 + 0"),
    TestVector::new(Stress, 0, 1, 255, 254, "background almost fully through: 0 + 254"),
];

/// Runs every vector through `kernel`, writing one line per vector.
///
/// Mismatches are reported and counted; the whole table is always checked.
pub fn run_vectors<K, W>(vectors: &[TestVector], kernel: K, out: &mut W) -> Result<Tally>
where
    K: Fn(u8, u8, u8) -> u32,
    W: Write,
{
    let mut tally = Tally::default();
    debug!(count = vectors.len(), "running composition vectors");
    writeln!(out, "Running {} sRGB composition tests...", vectors.len())?;
    writeln!(out)?;

    for (i, vector) in vectors.iter().enumerate() {
        let index = i + 1;
        let computed = kernel(vector.foreground, vector.alpha, vector.background);
        let passed = computed == u32::from(vector.expected);
        tally.record(passed);
        if passed {
            writeln!(out, "PASS [{index}]: {}", vector.description)?;
        } else {
            let record = FailureRecord {
                index,
                sample: vector.sample(),
                computed,
                expected: u32::from(vector.expected),
            };
            warn!(%record, group = ?vector.group, "composition vector failed");
            writeln!(out, "FAIL [{}]: {}", record.index, vector.description)?;
            writeln!(out, "  {record}")?;
        }
    }

    writeln!(out)?;
    if tally.passed() {
        writeln!(out, "All {} tests passed.", tally.checked)?;
    } else {
        writeln!(out, "{} of {} tests FAILED.", tally.failed, tally.checked)?;
    }
    Ok(tally)
}
