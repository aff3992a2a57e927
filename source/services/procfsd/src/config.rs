// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! procfsd configuration loaded from TOML.
//!
//! ```toml
//! mount_point = "/proc"
//! max_open_files = 16
//!
//! [progmem]
//! enabled = true
//! page_size = 2048
//! page_count = 64
//! page_sizes = []      # per-page sizes; overrides page_size/page_count
//! programmed = [0, 1]  # pages holding data
//! ```

use std::fs;
use std::path::Path;

use log::info;
use nexus_hal::MemProgMem;
use serde::Deserialize;

use crate::{Result, ServiceError};

/// Largest bank the daemon will simulate; one flag is allocated per page.
pub const MAX_PAGE_COUNT: usize = 1 << 20;

/// Top-level daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcfsdConfig {
    /// Path the procfs tree is mounted at.
    pub mount_point: String,
    /// Limit of simultaneously open files.
    pub max_open_files: usize,
    /// Program memory bank published as `progmem`.
    pub progmem: ProgMemConfig,
}

impl Default for ProcfsdConfig {
    fn default() -> Self {
        Self {
            mount_point: nexus_procfs::fs::DEFAULT_MOUNT_POINT.to_string(),
            max_open_files: nexus_procfs::fs::DEFAULT_MAX_OPEN,
            progmem: ProgMemConfig::default(),
        }
    }
}

/// Geometry and contents of the simulated program memory bank.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgMemConfig {
    /// Register the `progmem` entry.
    pub enabled: bool,
    /// Size of each page for uniform banks.
    pub page_size: usize,
    /// Number of pages for uniform banks.
    pub page_count: usize,
    /// Explicit per-page sizes.
    pub page_sizes: Vec<usize>,
    /// Indices of programmed pages; all others are erased.
    pub programmed: Vec<usize>,
}

impl Default for ProgMemConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            page_size: 2048,
            page_count: 64,
            page_sizes: Vec::new(),
            programmed: Vec::new(),
        }
    }
}

impl ProgMemConfig {
    fn page_count(&self) -> usize {
        if self.page_sizes.is_empty() {
            self.page_count
        } else {
            self.page_sizes.len()
        }
    }

    /// Builds the in-memory bank described by this section.
    pub fn build(&self) -> MemProgMem {
        let bank = if self.page_sizes.is_empty() {
            MemProgMem::uniform(self.page_size, self.page_count)
        } else {
            MemProgMem::with_page_sizes(self.page_sizes.iter().copied())
        };
        for &page in &self.programmed {
            bank.program(page);
        }
        bank
    }

    fn validate(&self) -> Result<()> {
        if self.page_sizes.is_empty() && self.page_size == 0 {
            return Err(ServiceError::InvalidConfig("progmem.page_size must be non-zero".into()));
        }
        if self.page_sizes.contains(&0) {
            return Err(ServiceError::InvalidConfig("progmem.page_sizes contains 0".into()));
        }
        let count = self.page_count();
        if count > MAX_PAGE_COUNT {
            return Err(ServiceError::InvalidConfig(format!(
                "progmem bank has {count} pages (limit {MAX_PAGE_COUNT})"
            )));
        }
        let arena = if self.page_sizes.is_empty() {
            self.page_size.checked_mul(self.page_count)
        } else {
            self.page_sizes.iter().try_fold(0usize, |total, &size| total.checked_add(size))
        };
        if arena.is_none() {
            return Err(ServiceError::InvalidConfig("progmem bank size overflows usize".into()));
        }
        if let Some(page) = self.programmed.iter().find(|&&page| page >= count) {
            return Err(ServiceError::InvalidConfig(format!(
                "progmem.programmed page {page} out of range (bank has {count} pages)"
            )));
        }
        Ok(())
    }
}

impl ProcfsdConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("procfsd: {} missing, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|source| ServiceError::Io { path: path.to_path_buf(), source })?;
        let config = Self::parse(&raw)
            .map_err(|source| ServiceError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document without validating it.
    pub fn parse(raw: &str) -> core::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Checks limits and bank geometry.
    pub fn validate(&self) -> Result<()> {
        if self.max_open_files == 0 {
            return Err(ServiceError::InvalidConfig("max_open_files must be non-zero".into()));
        }
        if !self.mount_point.starts_with('/') {
            return Err(ServiceError::InvalidConfig(format!(
                "mount_point {:?} must be absolute",
                self.mount_point
            )));
        }
        self.progmem.validate()
    }
}
