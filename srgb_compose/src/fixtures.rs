// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Enumeration of the PNG fixtures the decode tests read.
//!
//! Each fixture is produced by an external image construction tool from a
//! gamma tag, a color type and a bit depth. This module only plans the jobs
//! and renders their arguments; running the tool is left to the caller.

use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GammaTag {
    None,
    Srgb,
    Linear,
    Gamma18,
}

impl GammaTag {
    pub const ALL: [GammaTag; 4] = [
        GammaTag::None,
        GammaTag::Srgb,
        GammaTag::Linear,
        GammaTag::Gamma18,
    ];

    pub fn name(self) -> Option<&'static str> {
        match self {
            GammaTag::None => None,
            GammaTag::Srgb => Some("sRGB"),
            GammaTag::Linear => Some("linear"),
            GammaTag::Gamma18 => Some("1.8"),
        }
    }

    /// Tool flag selecting this gamma, if any.
    pub fn flag(self) -> Option<String> {
        self.name().map(|name| format!("--{name}"))
    }

    pub fn file_prefix(self) -> String {
        self.name().map(|name| format!("{name}-")).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorType {
    Gray,
    Palette,
    GrayAlpha,
    Rgb,
    RgbAlpha,
}

impl ColorType {
    pub fn name(self) -> &'static str {
        match self {
            ColorType::Gray => "gray",
            ColorType::Palette => "palette",
            ColorType::GrayAlpha => "gray-alpha",
            ColorType::Rgb => "rgb",
            ColorType::RgbAlpha => "rgb-alpha",
        }
    }

    /// Bit depths PNG allows for this color type.
    pub fn bit_depths(self) -> &'static [u8] {
        match self {
            ColorType::Gray => &[1, 2, 4, 8, 16],
            ColorType::Palette => &[1, 2, 4, 8],
            ColorType::GrayAlpha | ColorType::Rgb | ColorType::RgbAlpha => &[8, 16],
        }
    }
}

impl fmt::Display for ColorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureJob {
    gamma: GammaTag,
    color_type: ColorType,
    bit_depth: u8,
}

impl FixtureJob {
    pub fn new(gamma: GammaTag, color_type: ColorType, bit_depth: u8) -> Result<Self> {
        if !color_type.bit_depths().contains(&bit_depth) {
            return Err(Error::UnsupportedBitDepth {
                color_type: color_type.name(),
                bit_depth,
            });
        }
        Ok(Self {
            gamma,
            color_type,
            bit_depth,
        })
    }

    pub fn gamma(&self) -> GammaTag {
        self.gamma
    }

    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// `<gamma-prefix-><color-type>-<bit-depth>.png`
    pub fn file_name(&self) -> String {
        format!(
            "{}{}-{}.png",
            self.gamma.file_prefix(),
            self.color_type,
            self.bit_depth
        )
    }

    /// Arguments for the construction tool, ending with the output name.
    pub fn command_args(&self, small: bool) -> Vec<String> {
        let mut args = Vec::with_capacity(5);
        if small {
            args.push("--small".to_string());
        }
        args.extend(self.gamma.flag());
        args.push(self.color_type.name().to_string());
        args.push(self.bit_depth.to_string());
        args.push(self.file_name());
        args
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureMode {
    /// Every gamma tag with every color type and bit depth.
    All,
    /// The smallest set that still reaches every decode path of interest.
    Coverage,
}

const COVERAGE: [(GammaTag, ColorType, u8); 10] = [
    // sRGB opaque component path.
    (GammaTag::None, ColorType::GrayAlpha, 8),
    // Basic palette read.
    (GammaTag::None, ColorType::Palette, 8),
    // Gamma threshold handling.
    (GammaTag::Gamma18, ColorType::Gray, 2),
    (GammaTag::Gamma18, ColorType::Palette, 2),
    (GammaTag::Gamma18, ColorType::Palette, 4),
    // Error limits only.
    (GammaTag::Gamma18, ColorType::Palette, 8),
    (GammaTag::Linear, ColorType::Palette, 8),
    (GammaTag::Linear, ColorType::RgbAlpha, 16),
    (GammaTag::Srgb, ColorType::Palette, 1),
    (GammaTag::Srgb, ColorType::RgbAlpha, 16),
];

impl FixtureMode {
    pub fn jobs(self) -> Vec<FixtureJob> {
        match self {
            FixtureMode::All => all_jobs(),
            FixtureMode::Coverage => COVERAGE
                .iter()
                .map(|&(gamma, color_type, bit_depth)| FixtureJob {
                    gamma,
                    color_type,
                    bit_depth,
                })
                .collect(),
        }
    }
}

fn all_jobs() -> Vec<FixtureJob> {
    let mut jobs = Vec::new();
    let mut push = |gamma, color_type, bit_depth| {
        jobs.push(FixtureJob {
            gamma,
            color_type,
            bit_depth,
        })
    };
    for gamma in GammaTag::ALL {
        for color_type in [ColorType::Gray, ColorType::Palette] {
            for bit_depth in [1, 2, 4] {
                push(gamma, color_type, bit_depth);
            }
        }
        push(gamma, ColorType::Palette, 8);
        for color_type in [
            ColorType::Gray,
            ColorType::GrayAlpha,
            ColorType::Rgb,
            ColorType::RgbAlpha,
        ] {
            for bit_depth in [8, 16] {
                push(gamma, color_type, bit_depth);
            }
        }
    }
    jobs
}
