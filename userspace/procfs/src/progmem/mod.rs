// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! `progmem` procfs entry.
//!
//! The file is a two-line document: a fixed column header followed by the
//! usage of the program memory bank, recomputed whenever a read reaches it.
//!
//! ```text
//!              total       used       free    largest
//! Prog:         1024        256        768        256
//! ```
//!
//! `largest` is only measured on banks with uniform page geometry; see
//! [`ProgMemInfo::largest_free_block`].

mod info;

use std::sync::Arc;

use log::{debug, error};
use nexus_hal::ProgMem;

pub use info::ProgMemInfo;

use crate::entry::{Capabilities, Metadata, Mode, OpenFlags, ProcEntry, ProcFile};
use crate::error::{Error, Result};
use crate::line::{copy_window, LineBuffer};

/// Name the entry answers to below the procfs mount point.
pub const PROGMEM_NAME: &str = "progmem";

/// Width of every numeric column.
pub const FIELD_WIDTH: usize = 11;

const HEADER: &str = "             total       used       free    largest\n";
const ROW_LABEL: &str = "Prog:  ";
const FIELD_COUNT: usize = 4;

/// Decimal digits of the largest value a column can hold.
const MAX_DIGITS: usize = usize::MAX.ilog10() as usize + 1;
const FIELD_CAPACITY: usize = max(FIELD_WIDTH, MAX_DIGITS);

/// Scratch capacity per open file; holds the longest line the entry emits.
pub const LINE_CAPACITY: usize =
    max(HEADER.len(), ROW_LABEL.len() + FIELD_COUNT * FIELD_CAPACITY + 1);

const fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Procfs entry publishing the usage of a progmem bank.
pub struct ProgMemEntry<P> {
    progmem: Arc<P>,
}

impl<P> ProgMemEntry<P>
where
    P: ProgMem + Send + Sync + 'static,
{
    /// Publishes `progmem`.
    pub fn new(progmem: Arc<P>) -> Self {
        Self { progmem }
    }

    /// Current usage of the bank.
    pub fn info(&self) -> ProgMemInfo {
        ProgMemInfo::collect(&*self.progmem)
    }
}

impl<P> ProcEntry for ProgMemEntry<P>
where
    P: ProgMem + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        PROGMEM_NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::READ | Capabilities::STAT | Capabilities::DUP
    }

    fn open(&self, relpath: &str, flags: OpenFlags) -> Result<Box<dyn ProcFile>> {
        debug!("progmem: open '{relpath}'");
        if !flags.is_read_only() {
            error!("progmem: only read-only access supported");
            return Err(Error::AccessDenied);
        }
        if relpath != PROGMEM_NAME {
            error!("progmem: relpath is '{relpath}'");
            return Err(Error::NotFound);
        }
        let file = ProgMemFile::try_new(Arc::clone(&self.progmem))
            .inspect_err(|_| error!("progmem: failed to allocate file state"))?;
        Ok(Box::new(file))
    }

    fn stat(&self, relpath: &str) -> Result<Metadata> {
        if relpath != PROGMEM_NAME {
            error!("progmem: relpath is '{relpath}'");
            return Err(Error::NotFound);
        }
        Ok(Metadata::new(Mode::READ_ONLY_FILE, 0))
    }
}

/// Open-file state: the bank and the most recently formatted line.
pub struct ProgMemFile<P> {
    progmem: Arc<P>,
    line: LineBuffer,
}

impl<P> ProgMemFile<P>
where
    P: ProgMem + Send + Sync + 'static,
{
    fn try_new(progmem: Arc<P>) -> Result<Self> {
        Ok(Self { progmem, line: LineBuffer::try_new(LINE_CAPACITY)? })
    }

    fn try_dup(&self) -> Result<Self> {
        let line = self
            .line
            .try_clone()
            .inspect_err(|_| error!("progmem: failed to allocate file state"))?;
        Ok(Self { progmem: Arc::clone(&self.progmem), line })
    }

    /// Bytes of the line formatted by the last read.
    pub fn current_line(&self) -> &[u8] {
        self.line.as_bytes()
    }
}

impl<P> ProcFile for ProgMemFile<P>
where
    P: ProgMem + Send + Sync + 'static,
{
    fn read(&mut self, pos: u64, buf: &mut [u8]) -> Result<usize> {
        debug!("progmem: read pos={pos} len={}", buf.len());
        let mut skip = pos;

        self.line.format(format_args!("{}", HEADER));
        let mut total = copy_window(self.line.as_bytes(), buf, &mut skip);

        if total < buf.len() {
            let info = ProgMemInfo::collect(&*self.progmem);
            self.line.format(format_args!(
                "{}{:>w$}{:>w$}{:>w$}{:>w$}\n",
                ROW_LABEL,
                info.arena,
                info.used_bytes,
                info.free_bytes,
                info.largest_free_block,
                w = FIELD_WIDTH,
            ));
            total += copy_window(self.line.as_bytes(), &mut buf[total..], &mut skip);
        }

        Ok(total)
    }

    fn dup(&self) -> Result<Box<dyn ProcFile>> {
        Ok(Box::new(self.try_dup()?))
    }
}
