// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::{self, Write};
use std::process::ExitCode;

use color_eyre::eyre::{Result, WrapErr};
use srgb_compose::properties::SweepConfig;
use srgb_compose::runner::run_srgb;
use srgb_compose_cli::{exit_code, init_tracing};

// Command-line arguments are ignored; sampling is tuned through the
// SRGB_COMPOSE_* environment variables.
fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();

    let config = SweepConfig::from_env().wrap_err("Invalid sweep configuration")?;
    let mut out = io::stdout().lock();
    let summary = run_srgb(&config, &mut out)?;
    out.flush()?;
    Ok(exit_code(&summary))
}
