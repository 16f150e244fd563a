// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::{self, Write};
use std::process::ExitCode;

use srgb_compose::fixtures::{FixtureJob, FixtureMode};
use srgb_compose::runner::RunSummary;

pub fn init_tracing() {
    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

pub fn exit_code(summary: &RunSummary) -> ExitCode {
    ExitCode::from(summary.exit_status())
}

/// One shell line per fixture, invoking `tool` with the job's arguments.
pub fn fixture_commands(tool: &str, mode: FixtureMode, small: bool) -> Vec<String> {
    mode.jobs()
        .iter()
        .map(|job| command_line(tool, job, small))
        .collect()
}

/// Writes `lines` to `out`, one per line. Write errors such as a closed
/// pipe are returned instead of panicking.
pub fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn command_line(tool: &str, job: &FixtureJob, small: bool) -> String {
    let mut line = tool.to_string();
    for arg in job.command_args(small) {
        line.push(' ');
        line.push_str(&arg);
    }
    line
}
