// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Usage accounting for program memory, the progmem counterpart of `mallinfo`.

use nexus_hal::{PageStatus, ProgMem};

/// Aggregate page usage of a progmem bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgMemInfo {
    /// Total size of all pages.
    pub arena: usize,
    /// Bytes held by programmed pages.
    pub used_bytes: usize,
    /// Bytes held by erased pages.
    pub free_bytes: usize,
    /// Largest run of contiguous erased pages, in bytes.
    ///
    /// Only runs terminated by a programmed page are measured, and only when
    /// the bank has uniform geometry. A run reaching the end of the bank is
    /// counted in `free_bytes` but never here.
    pub largest_free_block: usize,
}

impl ProgMemInfo {
    /// Walks every page of `progmem` and tallies its usage.
    ///
    /// Totals saturate at `usize::MAX` instead of wrapping.
    pub fn collect<P: ProgMem + ?Sized>(progmem: &P) -> Self {
        let mut info = Self::default();
        let mut run_start: Option<usize> = None;

        for page in 0.. {
            let status = progmem.page_status(page);
            if status == PageStatus::OutOfRange {
                break;
            }
            let size = progmem.page_size(page);
            info.arena = info.arena.saturating_add(size);

            if status.is_erased() {
                info.free_bytes = info.free_bytes.saturating_add(size);
                run_start.get_or_insert(page);
                continue;
            }

            info.used_bytes = info.used_bytes.saturating_add(size);
            // Run length in pages is only convertible to bytes when every page
            // has the size of this one.
            if let Some(start) = run_start.take() {
                if progmem.is_uniform() {
                    let block = (page - start).saturating_mul(size);
                    info.largest_free_block = info.largest_free_block.max(block);
                }
            }
        }

        // A run still open here reaches the end of the bank and stays
        // unmeasured.
        info
    }
}
