// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Program memory (progmem) page access.
//!
//! Program memory is non-volatile and block-erasable: a page has to be erased
//! before it can be programmed again. Drivers expose the bank one page at a
//! time; callers walk indices upward until [`PageStatus::OutOfRange`].

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

/// Erase state of a single progmem page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStatus {
    /// Page is erased and can be programmed.
    Erased,
    /// Page holds programmed data.
    Programmed,
    /// Index is past the last page of the bank.
    OutOfRange,
}

impl PageStatus {
    /// Returns `true` for erased (free) pages.
    pub const fn is_erased(self) -> bool {
        matches!(self, Self::Erased)
    }
}

/// Page-level query interface of a progmem bank.
///
/// Queries are infallible; implementations shared between threads must keep
/// them reentrant.
pub trait ProgMem {
    /// Erase state of `page`, or [`PageStatus::OutOfRange`] past the end.
    fn page_status(&self, page: usize) -> PageStatus;

    /// Size of `page` in bytes. Out-of-range pages report 0.
    fn page_size(&self, page: usize) -> usize;

    /// Whether every page of the bank has the same size.
    fn is_uniform(&self) -> bool;
}

impl<T: ProgMem + ?Sized> ProgMem for &T {
    fn page_status(&self, page: usize) -> PageStatus {
        (**self).page_status(page)
    }

    fn page_size(&self, page: usize) -> usize {
        (**self).page_size(page)
    }

    fn is_uniform(&self) -> bool {
        (**self).is_uniform()
    }
}

impl<T: ProgMem + ?Sized> ProgMem for Arc<T> {
    fn page_status(&self, page: usize) -> PageStatus {
        (**self).page_status(page)
    }

    fn page_size(&self, page: usize) -> usize {
        (**self).page_size(page)
    }

    fn is_uniform(&self) -> bool {
        (**self).is_uniform()
    }
}

struct MemPage {
    size: usize,
    erased: AtomicBool,
}

/// In-memory progmem bank.
///
/// Pages start erased. Programming and erasing go through `&self` so a bank
/// shared behind an [`Arc`] can change while readers hold it.
pub struct MemProgMem {
    pages: Vec<MemPage>,
    uniform: bool,
}

impl MemProgMem {
    /// Bank of `page_count` pages of `page_size` bytes each.
    pub fn uniform(page_size: usize, page_count: usize) -> Self {
        Self::with_page_sizes((0..page_count).map(|_| page_size))
    }

    /// Bank whose page sizes are taken from `sizes`, in order.
    pub fn with_page_sizes<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let pages: Vec<MemPage> = sizes
            .into_iter()
            .map(|size| MemPage { size, erased: AtomicBool::new(true) })
            .collect();
        let uniform = pages.windows(2).all(|pair| pair[0].size == pair[1].size);
        Self { pages, uniform }
    }

    /// Number of pages in the bank.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Marks `page` as programmed. Returns `false` when out of range.
    pub fn program(&self, page: usize) -> bool {
        self.set_erased(page, false)
    }

    /// Marks `page` as erased. Returns `false` when out of range.
    pub fn erase(&self, page: usize) -> bool {
        self.set_erased(page, true)
    }

    fn set_erased(&self, page: usize, erased: bool) -> bool {
        match self.pages.get(page) {
            Some(entry) => {
                entry.erased.store(erased, Ordering::Release);
                true
            }
            None => false,
        }
    }
}

impl ProgMem for MemProgMem {
    fn page_status(&self, page: usize) -> PageStatus {
        match self.pages.get(page) {
            Some(entry) if entry.erased.load(Ordering::Acquire) => PageStatus::Erased,
            Some(_) => PageStatus::Programmed,
            None => PageStatus::OutOfRange,
        }
    }

    fn page_size(&self, page: usize) -> usize {
        self.pages.get(page).map_or(0, |entry| entry.size)
    }

    fn is_uniform(&self) -> bool {
        self.uniform
    }
}
