// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Hardware abstraction traits shared by drivers and procfs entries
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Stable
//! TEST_COVERAGE: Unit tests + tests/progmem.rs
//!
//! PUBLIC API:
//!   - ProgMem: page-level view of erasable program memory
//!   - PageStatus: erase state of one page (or the end-of-range sentinel)
//!   - MemProgMem: in-memory program memory for host builds and tests
//!
//! ADR: docs/adr/0016-kernel-libs-architecture.md

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

pub mod progmem;

pub use progmem::{MemProgMem, PageStatus, ProgMem};
