// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end for procfsd.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nexus_procfs::OpenFlags;

use crate::{ProcfsdConfig, Result, Service};

/// Default configuration file location.
pub const DEFAULT_CONFIG: &str = "/etc/procfsd.toml";

/// procfsd publishes program memory usage through a procfs tree.
#[derive(Debug, Parser)]
#[command(name = "procfsd", version)]
pub struct Cli {
    /// Configuration file; defaults apply when it does not exist.
    #[arg(long, env = "PROCFSD_CONFIG", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// procfsd commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a procfs file.
    Cat {
        /// File to read.
        #[arg(default_value = "/proc/progmem")]
        path: String,
        /// Bytes requested per read.
        #[arg(long, default_value_t = 4096, value_parser = parse_chunk)]
        chunk: usize,
    },
    /// Print mode and size of a procfs file.
    Stat {
        /// File to inspect.
        path: String,
    },
    /// Print the raw program memory counters.
    Info,
}

fn parse_chunk(raw: &str) -> core::result::Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("chunk must be at least 1 byte".into()),
        Ok(chunk) => Ok(chunk),
        Err(err) => Err(format!("invalid chunk '{raw}': {err}")),
    }
}

/// Runs `cli`, writing command output to `out`.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = ProcfsdConfig::load(&cli.config)?;
    let service = Service::new(&config);
    run(&service, &cli.command, out)
}

/// Runs `command` against an already assembled service.
pub fn run(service: &Service, command: &Command, out: &mut dyn Write) -> Result<()> {
    let procfs = service.procfs();
    match command {
        Command::Cat { path, chunk } => {
            let fh = procfs.open(path, OpenFlags::RDONLY)?;
            let bytes = procfs.read_to_end(fh, *chunk);
            procfs.close(fh)?;
            out.write_all(&bytes?)?;
        }
        Command::Stat { path } => {
            let meta = procfs.stat(path)?;
            writeln!(out, "{path}: mode {:o} size {}", meta.mode().bits(), meta.size())?;
        }
        Command::Info => {
            let info = service.progmem_info()?;
            writeln!(out, "arena {}", info.arena)?;
            writeln!(out, "used {}", info.used_bytes)?;
            writeln!(out, "free {}", info.free_bytes)?;
            writeln!(out, "largest {}", info.largest_free_block)?;
        }
    }
    Ok(())
}
