// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Per-channel sRGB-space alpha composition of a palette sample over the
//! output buffer.
//!
//! The foreground is an sRGB value premultiplied on black (a palette entry
//! after gamma correction), the alpha comes from tRNS and the background is
//! the byte already present in the caller's buffer.

/// Largest value an 8-bit channel can hold.
pub const MAX_CHANNEL: u32 = 255;

/// Byte that decode output buffers are filled with before composition.
pub const BUFFER_INIT8: u8 = 73;

/// A single kernel input: one channel of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub foreground: u8,
    pub alpha: u8,
    pub background: u8,
}

impl Sample {
    pub const fn new(foreground: u8, alpha: u8, background: u8) -> Self {
        Self {
            foreground,
            alpha,
            background,
        }
    }
}

/// Composition before the final clamp, in a width that cannot wrap.
///
/// The premultiplied invariant `foreground <= alpha` is not assumed: tRNS
/// and palette data come straight from the file, so the result may exceed
/// [`MAX_CHANNEL`] for partially transparent samples.
#[inline]
pub fn compose_unclamped(foreground: u8, alpha: u8, background: u8) -> u32 {
    match alpha {
        0 => u32::from(background),
        255 => u32::from(foreground),
        _ => {
            let remaining = MAX_CHANNEL - u32::from(alpha);
            // +127 rounds the division by 255 half up.
            u32::from(foreground) + (remaining * u32::from(background) + 127) / MAX_CHANNEL
        }
    }
}

/// Blends one channel of `foreground` over `background`.
///
/// Fully transparent samples leave the background untouched and fully
/// opaque ones replace it. Anything in between is blended and clamped to
/// 255.
#[inline]
pub fn compose(foreground: u8, alpha: u8, background: u8) -> u8 {
    compose_unclamped(foreground, alpha, background).min(MAX_CHANNEL) as u8
}

/// [`compose`] in the widened form the verification harness checks.
#[inline]
pub fn srgb_kernel(foreground: u8, alpha: u8, background: u8) -> u32 {
    u32::from(compose(foreground, alpha, background))
}
