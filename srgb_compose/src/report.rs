// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;

use crate::compose::Sample;

/// A single mismatch between what a kernel computed and what was expected.
///
/// Built when a comparison fails and written out right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureRecord {
    /// 1-based position of the vector or sample in its sweep.
    pub index: usize,
    pub sample: Sample,
    pub computed: u32,
    pub expected: u32,
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compose({}, {}, {}) = {}, expected {}",
            self.sample.foreground,
            self.sample.alpha,
            self.sample.background,
            self.computed,
            self.expected
        )
    }
}

/// Pass/fail counters for one group of checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub checked: usize,
    pub failed: usize,
}

impl Tally {
    pub fn record(&mut self, passed: bool) {
        self.checked += 1;
        if !passed {
            self.failed += 1;
        }
    }

    pub fn passed(&self) -> bool {
        self.failed == 0
    }
}
