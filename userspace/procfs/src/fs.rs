// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Host-side procfs mount: entry table, handle table and read cursors.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use parking_lot::{Mutex, RwLock};

use crate::entry::{Capabilities, Metadata, OpenFlags, ProcEntry, ProcFile};
use crate::error::{Error, Operation, Result};

/// Default mount point of the procfs tree.
pub const DEFAULT_MOUNT_POINT: &str = "/proc";

/// Default limit of simultaneously open files.
pub const DEFAULT_MAX_OPEN: usize = 16;

/// Handle identifying an open procfs file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle(u32);

impl FileHandle {
    /// Exposes the raw identifier.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Generic open-file object; owns the read cursor.
struct OpenFile {
    entry: Arc<dyn ProcEntry>,
    pos: u64,
    file: Box<dyn ProcFile>,
}

struct HandleTable {
    files: HashMap<u32, Arc<Mutex<OpenFile>>>,
    next: u32,
}

impl HandleTable {
    fn insert(&mut self, file: OpenFile) -> FileHandle {
        let mut raw = self.next;
        while self.files.contains_key(&raw) {
            raw = raw.wrapping_add(1).max(1);
        }
        self.next = raw.wrapping_add(1).max(1);
        self.files.insert(raw, Arc::new(Mutex::new(file)));
        FileHandle(raw)
    }
}

/// Procfs tree mounted at a fixed path.
pub struct ProcFs {
    mount_point: String,
    max_open: usize,
    entries: RwLock<Vec<Arc<dyn ProcEntry>>>,
    handles: Mutex<HandleTable>,
}

impl ProcFs {
    /// Creates an empty tree mounted at `mount_point`.
    pub fn new(mount_point: impl Into<String>) -> Self {
        let mount_point = mount_point.into().trim_end_matches('/').to_string();
        Self {
            mount_point,
            max_open: DEFAULT_MAX_OPEN,
            entries: RwLock::new(Vec::new()),
            handles: Mutex::new(HandleTable { files: HashMap::new(), next: 1 }),
        }
    }

    /// Limits how many files may be open at once.
    pub fn with_max_open(mut self, max_open: usize) -> Self {
        self.max_open = max_open;
        self
    }

    /// Mount point the tree answers to.
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    /// Adds `entry`, replacing any entry registered under the same name.
    pub fn register(&self, entry: Arc<dyn ProcEntry>) {
        let mut entries = self.entries.write();
        entries.retain(|existing| existing.name() != entry.name());
        info!("procfs: registered {}/{}", self.mount_point, entry.name());
        entries.push(entry);
    }

    /// Opens `path` with `flags`.
    pub fn open(&self, path: &str, flags: OpenFlags) -> Result<FileHandle> {
        let (entry, relpath) = self.resolve(path)?;
        let mut handles = self.handles.lock();
        if handles.files.len() >= self.max_open {
            return Err(Error::NoMemory);
        }
        let file = entry.open(&relpath, flags)?;
        let fh = handles.insert(OpenFile { entry, pos: 0, file });
        debug!("procfs: open '{path}' -> {}", fh.raw());
        Ok(fh)
    }

    /// Reads at the handle's cursor and advances it by the bytes returned.
    pub fn read(&self, fh: FileHandle, buf: &mut [u8]) -> Result<usize> {
        let file = self.file(fh)?;
        let mut file = file.lock();
        let pos = file.pos;
        let count = file.file.read(pos, buf)?;
        file.pos += count as u64;
        Ok(count)
    }

    /// Writes at the handle's cursor. Entries without [`Capabilities::WRITE`]
    /// report [`Operation::Write`] as unsupported.
    pub fn write(&self, fh: FileHandle, buf: &[u8]) -> Result<usize> {
        let file = self.file(fh)?;
        let mut file = file.lock();
        if !file.entry.capabilities().contains(Capabilities::WRITE) {
            return Err(Error::Unsupported(Operation::Write));
        }
        let pos = file.pos;
        let count = file.file.write(pos, buf)?;
        file.pos += count as u64;
        Ok(count)
    }

    /// Duplicates `fh`. The new handle starts at the same cursor with its own
    /// copy of the open-file state. Entries without [`Capabilities::DUP`]
    /// report [`Operation::Dup`] as unsupported.
    pub fn dup(&self, fh: FileHandle) -> Result<FileHandle> {
        let copy = {
            let source = self.file(fh)?;
            let source = source.lock();
            if !source.entry.capabilities().contains(Capabilities::DUP) {
                return Err(Error::Unsupported(Operation::Dup));
            }
            OpenFile {
                entry: Arc::clone(&source.entry),
                pos: source.pos,
                file: source.file.dup()?,
            }
        };
        let mut handles = self.handles.lock();
        if handles.files.len() >= self.max_open {
            return Err(Error::NoMemory);
        }
        let new = handles.insert(copy);
        debug!("procfs: dup {} -> {}", fh.raw(), new.raw());
        Ok(new)
    }

    /// Closes `fh`, releasing its open-file state.
    pub fn close(&self, fh: FileHandle) -> Result<()> {
        match self.handles.lock().files.remove(&fh.raw()) {
            Some(_) => Ok(()),
            None => Err(Error::BadHandle),
        }
    }

    /// Reports metadata for `path`.
    pub fn stat(&self, path: &str) -> Result<Metadata> {
        let (entry, relpath) = self.resolve(path)?;
        entry.stat(&relpath)
    }

    /// Lists the directory at `path`.
    pub fn readdir(&self, path: &str) -> Result<Vec<String>> {
        let (entry, relpath) = self.resolve(path)?;
        entry.opendir(&relpath)
    }

    /// Current cursor of `fh`.
    pub fn position(&self, fh: FileHandle) -> Result<u64> {
        let file = self.file(fh)?;
        let pos = file.lock().pos;
        Ok(pos)
    }

    /// Number of open handles.
    pub fn open_count(&self) -> usize {
        self.handles.lock().files.len()
    }

    /// Reads `fh` to the end in reads of at most `chunk` bytes.
    pub fn read_to_end(&self, fh: FileHandle, chunk: usize) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut buf = vec![0u8; chunk.max(1)];
        loop {
            let count = self.read(fh, &mut buf)?;
            if count == 0 {
                return Ok(out);
            }
            out.extend_from_slice(&buf[..count]);
        }
    }

    fn file(&self, fh: FileHandle) -> Result<Arc<Mutex<OpenFile>>> {
        self.handles.lock().files.get(&fh.raw()).cloned().ok_or(Error::BadHandle)
    }

    fn resolve(&self, path: &str) -> Result<(Arc<dyn ProcEntry>, String)> {
        let rest = path.strip_prefix(self.mount_point.as_str()).ok_or(Error::NotFound)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return Err(Error::NotFound);
        }
        let relpath = rest.trim_start_matches('/');
        let name = relpath.split('/').next().unwrap_or_default();
        if name.is_empty() {
            return Err(Error::NotFound);
        }
        let entries = self.entries.read();
        let entry = entries
            .iter()
            .find(|entry| entry.name() == name)
            .cloned()
            .ok_or(Error::NotFound)?;
        Ok((entry, relpath.to_string()))
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_MOUNT_POINT)
    }
}
