//! In-memory virtual filesystem backing the guest `open` built-in and the
//! `file.read`/`readline`/`write`/`close` bound methods.
//!
//! A path-keyed `BTreeMap<Identifier, String>` that the embedding host
//! populates ahead of time, with no access to the real filesystem at all.

use crate::Identifier;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// The mode a file was opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
    Append,
}

/// An open file handle. Reads snapshot the file's contents at open time;
/// writes are buffered and only become visible to other handles (and to
/// `Vfs::read_file`) once [`FileHandle::close`] flushes them.
pub struct FileHandle {
    pub(crate) path: Identifier,
    pub(crate) mode: OpenMode,
    pub(crate) read_buf: String,
    pub(crate) read_pos: usize,
    pub(crate) write_buf: String,
    pub(crate) closed: bool,
}

impl FileHandle {
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Read the entire remaining unread content.
    pub fn read(&mut self) -> String {
        let rest = self.read_buf[self.read_pos..].to_string();
        self.read_pos = self.read_buf.len();
        rest
    }

    /// Read up to and excluding the next `\n`, advancing past it. If no
    /// more `\n` remains, reads the rest of the buffer (same as `read`).
    pub fn read_line(&mut self) -> String {
        let rest = &self.read_buf[self.read_pos..];
        match rest.find('\n') {
            Some(i) => {
                let line = rest[..i].to_string();
                self.read_pos += i + 1;
                line
            }
            None => self.read(),
        }
    }

    /// Append `data` to the handle's write buffer (not yet visible to the VFS).
    pub fn write(&mut self, data: &str) {
        self.write_buf.push_str(data);
    }
}

/// The virtual filesystem: a path → contents map, plus the set of handles
/// currently open against it.
#[derive(Default)]
pub struct Vfs {
    files: RefCell<BTreeMap<Identifier, String>>,
}

impl Vfs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file's contents directly, bypassing the guest `open`/`write`
    /// protocol. Used by the embedding host to pre-populate input files.
    pub fn seed(&self, path: impl Into<Identifier>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    /// Read back a file's current contents, for the embedding host to
    /// inspect after a script that wrote to it has run.
    #[must_use]
    pub fn snapshot(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    pub(crate) fn open(&self, path: &str, mode: OpenMode) -> Result<FileHandle, String> {
        let existing = self.files.borrow().get(path).cloned();
        match mode {
            OpenMode::Read => {
                let contents = existing.ok_or_else(|| format!("no such file: {path}"))?;
                Ok(FileHandle {
                    path: path.into(),
                    mode,
                    read_buf: contents,
                    read_pos: 0,
                    write_buf: String::new(),
                    closed: false,
                })
            }
            OpenMode::Write => Ok(FileHandle {
                path: path.into(),
                mode,
                read_buf: String::new(),
                read_pos: 0,
                write_buf: String::new(),
                closed: false,
            }),
            OpenMode::Append => Ok(FileHandle {
                path: path.into(),
                mode,
                read_buf: String::new(),
                read_pos: 0,
                write_buf: existing.unwrap_or_default(),
                closed: false,
            }),
        }
    }

    pub(crate) fn close(&self, handle: &mut FileHandle) {
        if handle.closed {
            return;
        }
        handle.closed = true;
        match handle.mode {
            OpenMode::Read => {}
            OpenMode::Write | OpenMode::Append => {
                self.files
                    .borrow_mut()
                    .insert(handle.path.clone(), std::mem::take(&mut handle.write_buf));
            }
        }
    }
}
