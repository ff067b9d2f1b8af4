// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use dapcodec::ByteStream;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Drain a byte stream into a file, or stdout when no path is given.
pub fn write_stream(output: Option<&Path>, stream: ByteStream<'_>) -> Result {
    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            drain(&mut file, stream)?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            drain(&mut lock, stream)?;
        }
    }
    Ok(())
}

fn drain(writer: &mut impl Write, stream: ByteStream<'_>) -> Result {
    for chunk in stream {
        writer.write_all(&chunk?)?;
    }
    writer.flush()?;
    Ok(())
}
