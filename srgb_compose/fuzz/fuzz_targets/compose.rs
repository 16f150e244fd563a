// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
#![no_main]

use libfuzzer_sys::fuzz_target;
use srgb_compose::{compose, compose_unclamped};

fuzz_target!(|data: [u8; 3]| {
    let [foreground, alpha, background] = data;
    let result = compose(foreground, alpha, background);
    match alpha {
        0 => assert_eq!(result, background),
        255 => assert_eq!(result, foreground),
        _ => {
            let wide = compose_unclamped(foreground, alpha, background);
            assert_eq!(u32::from(result), wide.min(255));
            assert!(result >= foreground);
            if background < u8::MAX {
                assert!(compose(foreground, alpha, background + 1) >= result);
            }
        }
    }
});
