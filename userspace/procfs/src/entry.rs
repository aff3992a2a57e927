// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Operation table shared by procfs entries.
//!
//! An entry only implements the operations it supports. Anything else falls
//! through to a default that reports [`Error::Unsupported`], so a missing
//! operation is never mistaken for a silent success.

use crate::error::{Error, Operation, Result};

bitflags::bitflags! {
    /// Access mode requested by `open`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OpenFlags: u32 {
        /// Open for reading.
        const RDONLY = 1 << 0;
        /// Open for writing.
        const WRONLY = 1 << 1;
        /// Open for reading and writing.
        const RDWR = Self::RDONLY.bits() | Self::WRONLY.bits();
    }
}

impl OpenFlags {
    /// True when the flags ask for read access and nothing else.
    pub const fn is_read_only(self) -> bool {
        self.contains(Self::RDONLY) && !self.contains(Self::WRONLY)
    }
}

bitflags::bitflags! {
    /// Operations an entry advertises to the filesystem layer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Files can be read.
        const READ = 1 << 0;
        /// Entry answers `stat`.
        const STAT = 1 << 1;
        /// Open files can be duplicated.
        const DUP = 1 << 2;
        /// Files can be written.
        const WRITE = 1 << 3;
        /// Entry is a directory.
        const READDIR = 1 << 4;
    }
}

bitflags::bitflags! {
    /// File type and permission bits reported by `stat`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Mode: u32 {
        /// Regular file.
        const IFREG = 0o100000;
        /// Directory.
        const IFDIR = 0o040000;
        /// Owner read.
        const IRUSR = 0o400;
        /// Owner write.
        const IWUSR = 0o200;
        /// Owner execute.
        const IXUSR = 0o100;
        /// Group read.
        const IRGRP = 0o040;
        /// Group write.
        const IWGRP = 0o020;
        /// Group execute.
        const IXGRP = 0o010;
        /// Other read.
        const IROTH = 0o004;
        /// Other write.
        const IWOTH = 0o002;
        /// Other execute.
        const IXOTH = 0o001;
    }
}

impl Mode {
    /// `r--r--r--` regular file.
    pub const READ_ONLY_FILE: Self = Self::IFREG
        .union(Self::IRUSR)
        .union(Self::IRGRP)
        .union(Self::IROTH);

    /// Returns `true` for regular files.
    pub const fn is_file(self) -> bool {
        self.contains(Self::IFREG)
    }

    /// Returns `true` when no write bit is set.
    pub const fn is_read_only(self) -> bool {
        !self.intersects(Self::IWUSR.union(Self::IWGRP).union(Self::IWOTH))
    }
}

/// Metadata returned by `stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    mode: Mode,
    size: u64,
}

impl Metadata {
    /// Creates a new metadata description.
    pub const fn new(mode: Mode, size: u64) -> Self {
        Self { mode, size }
    }

    /// File type and permission bits.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Size in bytes. Generated files report 0.
    pub const fn size(&self) -> u64 {
        self.size
    }
}

/// Per-open state of a procfs file.
///
/// The read cursor lives in the filesystem layer and is passed to every read.
pub trait ProcFile: Send {
    /// Copies document bytes starting at `pos` into `buf`; 0 means end of file.
    fn read(&mut self, pos: u64, buf: &mut [u8]) -> Result<usize>;

    /// Creates an independent copy of this open state.
    fn dup(&self) -> Result<Box<dyn ProcFile>>;

    /// Writes are unsupported unless an entry overrides this.
    fn write(&mut self, _pos: u64, _buf: &[u8]) -> Result<usize> {
        Err(Error::Unsupported(Operation::Write))
    }
}

/// A node registered under the procfs mount point.
pub trait ProcEntry: Send + Sync {
    /// First path component the entry answers to.
    fn name(&self) -> &str;

    /// Operations this entry implements.
    fn capabilities(&self) -> Capabilities;

    /// Opens `relpath` with `flags`.
    fn open(&self, relpath: &str, flags: OpenFlags) -> Result<Box<dyn ProcFile>>;

    /// Reports metadata for `relpath`.
    fn stat(&self, relpath: &str) -> Result<Metadata>;

    /// Lists children of `relpath`. Files do not override this.
    fn opendir(&self, _relpath: &str) -> Result<Vec<String>> {
        Err(Error::Unsupported(Operation::Opendir))
    }
}
