// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod mock;

/// What kind of entry a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks (when not followed), sockets, devices, ...
    Other,
}

/// The subset of file metadata the change detector needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    pub kind: EntryKind,
    pub modified: SystemTime,
}

impl FileMeta {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Abstract filesystem interface.
///
/// Errors are plain `io::Error`s so that callers can attach the path and
/// decide how fatal they are.
pub trait FileSystem: Send + Sync + Debug {
    /// Metadata for `path`, following symbolic links.
    fn metadata(&self, path: &Path) -> io::Result<FileMeta>;

    /// Metadata for `path` itself; symbolic links are reported as
    /// [`EntryKind::Other`].
    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMeta>;

    /// Return a list of entries in a directory.
    /// Returns full paths, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    fn convert(meta: fs::Metadata) -> io::Result<FileMeta> {
        let file_type = meta.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        Ok(FileMeta {
            kind,
            modified: meta.modified()?,
        })
    }
}

impl FileSystem for RealFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<FileMeta> {
        Self::convert(fs::metadata(path)?)
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMeta> {
        Self::convert(fs::symlink_metadata(path)?)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(entry.path());
        }
        Ok(entries)
    }
}
