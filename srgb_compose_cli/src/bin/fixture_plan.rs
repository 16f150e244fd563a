// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::Result;
use srgb_compose::fixtures::FixtureMode;
use srgb_compose_cli::{fixture_commands, init_tracing, write_lines};

/// Prints the commands that build the PNG test fixtures, one per line.
#[derive(Parser)]
#[command(name = "fixture_plan")]
struct Opt {
    /// Every gamma, color type and bit depth combination (the default)
    #[arg(long, conflicts_with = "coverage")]
    all: bool,

    /// Minimal set of fixtures that still covers the decode paths
    #[arg(long)]
    coverage: bool,

    /// Ask the tool for small images
    #[arg(long)]
    small: bool,

    /// Image construction tool to invoke
    #[arg(long, default_value = "makepng")]
    tool: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let opt = Opt::parse();
    let mode = match (opt.all, opt.coverage) {
        (false, true) => FixtureMode::Coverage,
        _ => FixtureMode::All,
    };
    let mut out = io::stdout().lock();
    write_lines(&mut out, &fixture_commands(&opt.tool, mode, opt.small))?;
    out.flush()?;
    Ok(())
}
