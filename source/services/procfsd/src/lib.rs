// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Host procfs daemon exposing program memory usage
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests + tests/cli.rs
//!
//! PUBLIC API:
//!   - Service: procfs tree built from a ProcfsdConfig
//!   - Cli/execute: `cat`, `stat`, `info` commands
//!   - ProcfsdConfig: TOML configuration
//!
//! DEPENDENCIES:
//!   - nexus-procfs: mount/handle tables and the progmem entry
//!   - nexus-hal: in-memory progmem bank
//!   - serde/toml: configuration
//!
//! ADR: docs/adr/0017-service-architecture.md

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs)]

pub mod cli;
pub mod config;

use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use nexus_hal::MemProgMem;
use nexus_procfs::{ProcFs, ProgMemEntry, ProgMemInfo};
use thiserror::Error;

pub use cli::{execute, Cli, Command};
pub use config::{ProcfsdConfig, ProgMemConfig};

/// Result alias used by the daemon.
pub type Result<T> = core::result::Result<T, ServiceError>;

/// Errors surfaced by the daemon.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Failed to read the configuration file.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Location associated with the error.
        path: PathBuf,
        /// Underlying operating system error.
        source: std::io::Error,
    },
    /// Configuration file is not valid TOML for [`ProcfsdConfig`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Location of the malformed file.
        path: PathBuf,
        /// Error returned by the TOML deserializer.
        source: toml::de::Error,
    },
    /// Configuration parsed but describes an unusable setup.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Procfs operation failed.
    #[error("procfs: {} (status {})", .0, .0.errno())]
    Procfs(#[from] nexus_procfs::Error),
    /// Writing command output failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Procfs tree assembled from configuration.
pub struct Service {
    fs: ProcFs,
    progmem: Option<Arc<ProgMemEntry<MemProgMem>>>,
}

impl Service {
    /// Mounts the tree and registers the configured entries.
    pub fn new(config: &ProcfsdConfig) -> Self {
        let fs = ProcFs::new(config.mount_point.as_str()).with_max_open(config.max_open_files);
        let progmem = config.progmem.enabled.then(|| {
            let bank = config.progmem.build();
            info!(
                "procfsd: progmem bank {} pages (uniform: {})",
                bank.page_count(),
                nexus_hal::ProgMem::is_uniform(&bank)
            );
            let entry = Arc::new(ProgMemEntry::new(Arc::new(bank)));
            fs.register(entry.clone());
            entry
        });
        Self { fs, progmem }
    }

    /// The mounted procfs tree.
    pub fn procfs(&self) -> &ProcFs {
        &self.fs
    }

    /// Current usage of the progmem bank, if the entry is registered.
    pub fn progmem_info(&self) -> Result<ProgMemInfo> {
        self.progmem
            .as_ref()
            .map(|entry| entry.info())
            .ok_or(ServiceError::Procfs(nexus_procfs::Error::NotFound))
    }
}
