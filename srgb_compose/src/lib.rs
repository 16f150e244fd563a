// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! sRGB-space alpha composition used when reading palette images with tRNS
//! transparency, along with the harness that checks it.

#![deny(unsafe_code)]
pub mod compose;
pub mod error;
pub mod fixtures;
pub mod properties;
pub mod report;
pub mod runner;
mod util;
pub mod vectors;

pub use compose::{compose, compose_unclamped};
