// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Line-at-a-time document rendering.
//!
//! Generated files are produced one line at a time into a scratch buffer and
//! sliced into the caller's buffer with [`copy_window`]. The skip counter
//! carries the file position across lines so a read can resume anywhere.

use core::fmt;

use crate::error::{Error, Result};

/// Copies the part of `src` that lies past `*skip` into `dest`.
///
/// When `src` lies entirely before the window, `*skip` is reduced by its
/// length and nothing is copied. Otherwise the remaining skip is consumed,
/// `*skip` becomes 0 and up to `dest.len()` bytes are copied.
pub fn copy_window(src: &[u8], dest: &mut [u8], skip: &mut u64) -> usize {
    let src_len = src.len() as u64;
    if *skip >= src_len {
        *skip -= src_len;
        return 0;
    }
    let tail = &src[*skip as usize..];
    *skip = 0;
    let count = tail.len().min(dest.len());
    dest[..count].copy_from_slice(&tail[..count]);
    count
}

/// Fixed-capacity scratch buffer holding the most recently formatted line.
#[derive(Debug, PartialEq, Eq)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl LineBuffer {
    /// Allocates a zeroed buffer of `capacity` bytes.
    pub fn try_new(capacity: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(capacity).map_err(|_| Error::NoMemory)?;
        bytes.resize(capacity, 0);
        Ok(Self { bytes, len: 0 })
    }

    /// Allocates a new buffer with the same capacity, bytes and length.
    pub fn try_clone(&self) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(self.bytes.len()).map_err(|_| Error::NoMemory)?;
        bytes.extend_from_slice(&self.bytes);
        Ok(Self { bytes, len: self.len })
    }

    /// Fixed capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Valid bytes of the current line.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Replaces the content with `args`, returning the new length.
    ///
    /// Output beyond the capacity is dropped, so capacity has to cover the
    /// longest line the caller can produce.
    pub fn format(&mut self, args: fmt::Arguments<'_>) -> usize {
        let mut writer = Truncating { buf: &mut self.bytes, len: 0, overflowed: false };
        // Truncating never reports an error.
        let _ = fmt::write(&mut writer, args);
        debug_assert!(!writer.overflowed, "line exceeds scratch capacity");
        self.len = writer.len;
        self.len
    }
}

struct Truncating<'a> {
    buf: &'a mut [u8],
    len: usize,
    overflowed: bool,
}

impl fmt::Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - self.len;
        let count = s.len().min(room);
        self.buf[self.len..self.len + count].copy_from_slice(&s.as_bytes()[..count]);
        self.len += count;
        if count < s.len() {
            self.overflowed = true;
        }
        Ok(())
    }
}
