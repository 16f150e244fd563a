// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),
    #[error("Invalid stride for {name}: {value:?}, expected a positive integer")]
    InvalidStride { name: &'static str, value: String },
    #[error("Invalid count for {name}: {value:?}")]
    InvalidCount { name: &'static str, value: String },
    #[error("Bit depth {bit_depth} is not valid for color type {color_type}")]
    UnsupportedBitDepth {
        color_type: &'static str,
        bit_depth: u8,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
