// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Procfs entries and host filesystem layer
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests + tests/progmem_read.rs, tests/progmem_props.rs
//!
//! PUBLIC API:
//!   - ProcFs: mount table, handle table and read cursors
//!   - ProcEntry/ProcFile: operation table implemented by entries
//!   - ProgMemEntry: `progmem` usage file backed by a nexus_hal::ProgMem bank
//!   - ProgMemInfo: page usage accounting
//!   - Error: procfs error codes
//!
//! DEPENDENCIES:
//!   - nexus-hal: progmem page queries
//!   - parking_lot: handle table locking
//!   - bitflags: open flags, capabilities, mode bits
//!
//! ADR: docs/adr/0016-kernel-libs-architecture.md

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs)]

pub mod entry;
mod error;
pub mod fs;
pub mod line;
pub mod progmem;

pub use entry::{Capabilities, Metadata, Mode, OpenFlags, ProcEntry, ProcFile};
pub use error::{Error, Operation, Result};
pub use fs::{FileHandle, ProcFs};
pub use progmem::{ProgMemEntry, ProgMemInfo, PROGMEM_NAME};
