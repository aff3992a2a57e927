// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use thiserror::Error;

/// Result alias for procfs operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Operations an entry may leave out of its capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Writing through an open file.
    Write,
    /// Duplicating an open file.
    Dup,
    /// Opening the entry as a directory.
    Opendir,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write => f.write_str("write"),
            Self::Dup => f.write_str("dup"),
            Self::Opendir => f.write_str("opendir"),
        }
    }
}

/// Errors surfaced by procfs entries and the host filesystem layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Path does not name an entry.
    #[error("entry not found")]
    NotFound,
    /// Open requested write access on a read-only entry.
    #[error("access denied")]
    AccessDenied,
    /// Per-open state or a handle slot could not be allocated.
    #[error("out of memory")]
    NoMemory,
    /// File handle is unknown or already closed.
    #[error("bad file handle")]
    BadHandle,
    /// Entry does not implement the operation.
    #[error("operation not supported: {0}")]
    Unsupported(Operation),
}

impl Error {
    /// Negative errno reported to callers that speak status codes.
    pub const fn errno(self) -> i32 {
        match self {
            Self::NotFound => -2,
            Self::BadHandle => -9,
            Self::NoMemory => -12,
            Self::AccessDenied => -13,
            Self::Unsupported(_) => -38,
        }
    }
}
