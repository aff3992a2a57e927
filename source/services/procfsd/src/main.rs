// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: procfsd entrypoint wiring logging and the CLI to shared service logic
#![forbid(unsafe_code)]

use clap::Parser;

fn main() {
    env_logger::init();
    let cli = procfsd::Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = procfsd::execute(&cli, &mut out) {
        eprintln!("procfsd: {err}");
        std::process::exit(1);
    }
}
