// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Sweeps that check universal properties of a composition kernel over its
//! input domain.
//!
//! Every property is checked to completion and reported on its own, so a
//! kernel that breaks one of them still gets a verdict for the others.

use std::{io::Write, num::NonZeroUsize};

use crate::{
    compose::{MAX_CHANNEL, Sample},
    error::{Error, Result},
    report::FailureRecord,
    util::tracing_wrappers::*,
};

pub const IDENTITY_STRIDE_VAR: &str = "SRGB_COMPOSE_IDENTITY_STRIDE";
pub const RANGE_STRIDE_VAR: &str = "SRGB_COMPOSE_RANGE_STRIDE";
pub const MONOTONIC_STRIDE_VAR: &str = "SRGB_COMPOSE_MONOTONIC_STRIDE";
pub const MAX_REPORTED_VAR: &str = "SRGB_COMPOSE_MAX_REPORTED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// `compose(fg, 0, bg) == bg`
    TransparencyIdentity,
    /// `compose(fg, 255, bg) == fg`
    OpacityIdentity,
    /// `compose(fg, alpha, bg) <= 255`
    RangeClosure,
    /// `compose(fg, alpha, bg)` never decreases as `bg` grows, for
    /// `0 < alpha < 255`.
    BackgroundMonotonicity,
}

impl Property {
    pub const ALL: [Property; 4] = [
        Property::TransparencyIdentity,
        Property::OpacityIdentity,
        Property::RangeClosure,
        Property::BackgroundMonotonicity,
    ];

    pub fn number(self) -> usize {
        match self {
            Property::TransparencyIdentity => 1,
            Property::OpacityIdentity => 2,
            Property::RangeClosure => 3,
            Property::BackgroundMonotonicity => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Property::TransparencyIdentity => "alpha=0 => result = background",
            Property::OpacityIdentity => "alpha=255 => result = foreground",
            Property::RangeClosure => "result always in [0, 255]",
            Property::BackgroundMonotonicity => "monotonic in background",
        }
    }

    fn describe(self, violation: &FailureRecord) -> String {
        let Sample {
            foreground,
            alpha,
            background,
        } = violation.sample;
        match self {
            Property::TransparencyIdentity | Property::OpacityIdentity => violation.to_string(),
            Property::RangeClosure => format!(
                "compose({foreground}, {alpha}, {background}) = {} > {}",
                violation.computed, violation.expected
            ),
            Property::BackgroundMonotonicity => format!(
                "non-monotonic at fg={foreground}, alpha={alpha}, bg={background}: {} < {}",
                violation.computed, violation.expected
            ),
        }
    }
}

/// How densely each property samples the input domain.
///
/// Strides only trade run time against coverage; every property is claimed
/// for all inputs. A stride of 1 sweeps a dimension exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Foreground and background stride for the two identity properties.
    pub identity_stride: NonZeroUsize,
    /// Background stride for range closure; foreground and alpha are always
    /// swept in full.
    pub range_background_stride: NonZeroUsize,
    /// Foreground and alpha stride for monotonicity; background is always
    /// swept in full.
    pub monotonic_stride: NonZeroUsize,
    /// Violations printed per property before the rest are only counted.
    pub max_reported_violations: usize,
}

const DEFAULT_IDENTITY_STRIDE: NonZeroUsize = NonZeroUsize::new(51).unwrap();
const DEFAULT_RANGE_STRIDE: NonZeroUsize = NonZeroUsize::new(17).unwrap();
const DEFAULT_MONOTONIC_STRIDE: NonZeroUsize = NonZeroUsize::new(51).unwrap();

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            identity_stride: DEFAULT_IDENTITY_STRIDE,
            range_background_stride: DEFAULT_RANGE_STRIDE,
            monotonic_stride: DEFAULT_MONOTONIC_STRIDE,
            max_reported_violations: 8,
        }
    }
}

impl SweepConfig {
    pub fn exhaustive() -> Self {
        Self {
            identity_stride: NonZeroUsize::MIN,
            range_background_stride: NonZeroUsize::MIN,
            monotonic_stride: NonZeroUsize::MIN,
            ..Self::default()
        }
    }

    /// Default sampling with overrides from `SRGB_COMPOSE_*` environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let stride = |name: &'static str, default: NonZeroUsize| match lookup(name) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse::<NonZeroUsize>()
                .map_err(|_| Error::InvalidStride { name, value }),
        };
        config.identity_stride = stride(IDENTITY_STRIDE_VAR, config.identity_stride)?;
        config.range_background_stride =
            stride(RANGE_STRIDE_VAR, config.range_background_stride)?;
        config.monotonic_stride = stride(MONOTONIC_STRIDE_VAR, config.monotonic_stride)?;
        if let Some(value) = lookup(MAX_REPORTED_VAR) {
            config.max_reported_violations =
                value.trim().parse().map_err(|_| Error::InvalidCount {
                    name: MAX_REPORTED_VAR,
                    value,
                })?;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTally {
    pub property: Property,
    pub samples: usize,
    pub violations: usize,
}

impl PropertyTally {
    pub fn passed(&self) -> bool {
        self.violations == 0
    }
}

fn sweep(stride: NonZeroUsize) -> impl Iterator<Item = u8> {
    (0..=u8::MAX).step_by(stride.get())
}

/// Evaluates `property` over its sampled domain, handing every violation to
/// `on_violation`. Returns the number of samples checked.
pub(crate) fn sweep_property<K>(
    property: Property,
    kernel: &K,
    config: &SweepConfig,
    on_violation: &mut dyn FnMut(FailureRecord) -> Result<()>,
) -> Result<usize>
where
    K: Fn(u8, u8, u8) -> u32,
{
    let mut samples = 0;
    let mut check = |sample: Sample, computed: u32, expected: u32, ok: bool| {
        samples += 1;
        if ok {
            return Ok(());
        }
        on_violation(FailureRecord {
            index: samples,
            sample,
            computed,
            expected,
        })
    };

    match property {
        Property::TransparencyIdentity | Property::OpacityIdentity => {
            let alpha = if property == Property::TransparencyIdentity {
                0
            } else {
                u8::MAX
            };
            for background in sweep(config.identity_stride) {
                for foreground in sweep(config.identity_stride) {
                    let computed = kernel(foreground, alpha, background);
                    let expected = u32::from(if alpha == 0 { background } else { foreground });
                    check(
                        Sample::new(foreground, alpha, background),
                        computed,
                        expected,
                        computed == expected,
                    )?;
                }
            }
        }
        Property::RangeClosure => {
            for foreground in 0..=u8::MAX {
                for alpha in 0..=u8::MAX {
                    for background in sweep(config.range_background_stride) {
                        let computed = kernel(foreground, alpha, background);
                        check(
                            Sample::new(foreground, alpha, background),
                            computed,
                            MAX_CHANNEL,
                            computed <= MAX_CHANNEL,
                        )?;
                    }
                }
            }
        }
        Property::BackgroundMonotonicity => {
            for foreground in sweep(config.monotonic_stride) {
                for alpha in (1..u8::MAX).step_by(config.monotonic_stride.get()) {
                    let mut previous = kernel(foreground, alpha, 0);
                    for background in 1..=u8::MAX {
                        let computed = kernel(foreground, alpha, background);
                        check(
                            Sample::new(foreground, alpha, background),
                            computed,
                            previous,
                            computed >= previous,
                        )?;
                        previous = computed;
                    }
                }
            }
        }
    }
    Ok(samples)
}

/// Checks a single property and writes its title, up to
/// `max_reported_violations` failure lines and a summary line.
pub fn check_property<K, W>(
    property: Property,
    kernel: &K,
    config: &SweepConfig,
    out: &mut W,
) -> Result<PropertyTally>
where
    K: Fn(u8, u8, u8) -> u32,
    W: Write,
{
    writeln!(out, "Property {}: {}", property.number(), property.title())?;
    let mut violations = 0;
    let samples = sweep_property(property, kernel, config, &mut |violation| {
        violations += 1;
        if violations <= config.max_reported_violations {
            warn!(?property, %violation, "property violated");
            writeln!(
                out,
                "  FAIL [{}]: {}",
                violation.index,
                property.describe(&violation)
            )?;
        }
        Ok(())
    })?;

    let tally = PropertyTally {
        property,
        samples,
        violations,
    };
    if violations > config.max_reported_violations {
        writeln!(
            out,
            "  ... {} more violations not shown",
            violations - config.max_reported_violations
        )?;
    }
    if tally.passed() {
        writeln!(out, "  PASS ({samples} samples)")?;
    } else {
        writeln!(out, "  FAIL ({violations} violations over {samples} samples)")?;
    }
    debug!(?property, samples, violations, "property checked");
    Ok(tally)
}

/// Checks all four properties in order.
pub fn verify_properties<K, W>(
    kernel: K,
    config: &SweepConfig,
    out: &mut W,
) -> Result<Vec<PropertyTally>>
where
    K: Fn(u8, u8, u8) -> u32,
    W: Write,
{
    writeln!(out, "Verifying formula properties...")?;
    writeln!(out)?;
    let mut tallies = Vec::with_capacity(Property::ALL.len());
    for property in Property::ALL {
        tallies.push(check_property(property, &kernel, config, out)?);
    }

    let violations: usize = tallies.iter().map(|t| t.violations).sum();
    writeln!(out)?;
    if violations == 0 {
        writeln!(out, "All formula properties verified.")?;
    } else {
        writeln!(out, "{violations} property violations found.")?;
    }
    Ok(tallies)
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use test_log::test;

    use super::*;
    use crate::compose::{compose_unclamped, srgb_kernel};

    fn stride(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn verify_to_string<K: Fn(u8, u8, u8) -> u32>(
        kernel: K,
        config: &SweepConfig,
    ) -> (Vec<PropertyTally>, String) {
        let mut out = Vec::new();
        let tallies = verify_properties(kernel, config, &mut out).unwrap();
        (tallies, String::from_utf8(out).unwrap())
    }

    fn violations<K: Fn(u8, u8, u8) -> u32>(
        property: Property,
        kernel: K,
        config: &SweepConfig,
    ) -> Vec<FailureRecord> {
        let mut found = Vec::new();
        sweep_property(property, &kernel, config, &mut |v| {
            found.push(v);
            Ok(())
        })
        .unwrap();
        found
    }

    #[test]
    fn srgb_kernel_satisfies_everything() {
        let (tallies, report) = verify_to_string(srgb_kernel, &SweepConfig::default());
        let samples: Vec<_> = tallies.iter().map(|t| t.samples).collect();
        assert_eq!(samples, [36, 36, 256 * 256 * 16, 6 * 5 * 255]);
        assert!(tallies.iter().all(PropertyTally::passed));
        assert!(report.starts_with("Verifying formula properties...\n\n"));
        assert!(report.contains("Property 1: alpha=0 => result = background\n  PASS (36 samples)\n"));
        assert!(report.contains("Property 4: monotonic in background\n  PASS (7650 samples)\n"));
        assert!(report.ends_with("\nAll formula properties verified.\n"));
    }

    #[test]
    fn exhaustive_identities() {
        let config = SweepConfig::exhaustive();
        for property in [Property::TransparencyIdentity, Property::OpacityIdentity] {
            let mut out = Vec::new();
            let tally = check_property(property, &srgb_kernel, &config, &mut out).unwrap();
            assert_eq!(tally.samples, 256 * 256);
            assert!(tally.passed());
        }
    }

    #[test]
    fn exhaustive_monotonicity() {
        let mut out = Vec::new();
        let tally = check_property(
            Property::BackgroundMonotonicity,
            &srgb_kernel,
            &SweepConfig::exhaustive(),
            &mut out,
        )
        .unwrap();
        assert_eq!(tally.samples, 256 * 254 * 255);
        assert!(tally.passed());
    }

    #[test]
    fn clamp_is_load_bearing() {
        let config = SweepConfig {
            range_background_stride: stride(10),
            ..SweepConfig::default()
        };
        let found = violations(Property::RangeClosure, compose_unclamped, &config);
        assert!(!found.is_empty());
        let hit = found
            .iter()
            .find(|v| v.sample == Sample::new(250, 10, 250))
            .expect("(250, 10, 250) must exceed the channel range");
        assert_eq!(hit.computed, 490);
        assert_eq!(hit.expected, 255);

        // The clamp is the only difference, so the other properties still hold.
        for property in [
            Property::TransparencyIdentity,
            Property::OpacityIdentity,
            Property::BackgroundMonotonicity,
        ] {
            assert!(violations(property, compose_unclamped, &config).is_empty());
        }
    }

    #[test]
    fn violations_are_capped_in_report() {
        let config = SweepConfig {
            max_reported_violations: 2,
            ..SweepConfig::default()
        };
        let mut out = Vec::new();
        let tally =
            check_property(Property::RangeClosure, &compose_unclamped, &config, &mut out).unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(tally.violations > 2);
        assert_eq!(report.matches("  FAIL [").count(), 2);
        assert!(report.contains(&format!(
            "  ... {} more violations not shown\n",
            tally.violations - 2
        )));
        assert!(report.ends_with(&format!(
            "  FAIL ({} violations over {} samples)\n",
            tally.violations, tally.samples
        )));
    }

    #[test]
    fn properties_are_reported_independently() {
        // Ignores alpha entirely: only the transparency identity can notice.
        let (tallies, report) =
            verify_to_string(|fg, _, _| u32::from(fg), &SweepConfig::default());
        let failed: Vec<_> = tallies
            .iter()
            .filter(|t| !t.passed())
            .map(|t| t.property)
            .collect();
        assert_eq!(failed, [Property::TransparencyIdentity]);
        // Foreground and background differ on 30 of the 36 sampled pairs.
        assert_eq!(tallies[0].violations, 30);
        assert!(report.contains("Property 2: alpha=255 => result = foreground\n  PASS"));
        assert!(report.ends_with("\n30 property violations found.\n"));
    }

    #[test]
    fn detects_decreasing_blend() {
        let inverted = |fg: u8, alpha: u8, bg: u8| match alpha {
            0 => u32::from(bg),
            255 => u32::from(fg),
            _ => u32::from(u8::MAX - bg),
        };
        let (tallies, report) = verify_to_string(inverted, &SweepConfig::default());
        assert!(tallies[0].passed());
        assert!(tallies[1].passed());
        assert!(tallies[2].passed());
        assert_eq!(tallies[3].violations, tallies[3].samples);
        // Every sample is a violation, so the first one is sample 1.
        assert!(report.contains("  FAIL [1]: non-monotonic at fg=0, alpha=1, bg=1: 254 < 255\n"));
    }

    #[test]
    fn monotonic_sweep_skips_boundary_alphas() {
        let config = SweepConfig::exhaustive();
        let alphas: Vec<u8> = (1..u8::MAX).step_by(config.monotonic_stride.get()).collect();
        assert_eq!(alphas.first(), Some(&1));
        assert_eq!(alphas.last(), Some(&254));
        let default_alphas: Vec<u8> = (1..u8::MAX)
            .step_by(SweepConfig::default().monotonic_stride.get())
            .collect();
        assert_eq!(default_alphas, [1, 52, 103, 154, 205]);
    }

    #[test]
    fn sampling_includes_both_ends() {
        let default = SweepConfig::default();
        let identity: Vec<u8> = sweep(default.identity_stride).collect();
        assert_eq!(identity, [0, 51, 102, 153, 204, 255]);
        let range: Vec<u8> = sweep(default.range_background_stride).collect();
        assert_eq!(range.len(), 16);
        assert_eq!(range.last(), Some(&255));
    }

    #[test]
    fn config_from_lookup() {
        let vars = HashMap::from([
            (RANGE_STRIDE_VAR, "1".to_string()),
            (MAX_REPORTED_VAR, " 100 ".to_string()),
        ]);
        let config = SweepConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.range_background_stride, stride(1));
        assert_eq!(config.identity_stride, stride(51));
        assert_eq!(config.monotonic_stride, stride(51));
        assert_eq!(config.max_reported_violations, 100);

        let none = SweepConfig::from_lookup(|_| None).unwrap();
        assert_eq!(none, SweepConfig::default());
    }

    #[test]
    fn config_rejects_bad_values() {
        let zero = SweepConfig::from_lookup(|name| {
            (name == IDENTITY_STRIDE_VAR).then(|| "0".to_string())
        });
        assert!(matches!(
            zero,
            Err(Error::InvalidStride {
                name: IDENTITY_STRIDE_VAR,
                ..
            })
        ));
        let garbage =
            SweepConfig::from_lookup(|name| (name == MAX_REPORTED_VAR).then(|| "many".to_string()));
        assert!(matches!(garbage, Err(Error::InvalidCount { .. })));
    }
}
