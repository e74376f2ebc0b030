// src/watch/target.rs

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{BuildwatchError, Result};
use crate::fs::FileSystem;

/// The file or directory under observation.
///
/// Resolved once at startup and never re-classified afterwards: if a watched
/// directory is later replaced by a file, the next poll fails instead of
/// silently switching modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchTarget {
    File(PathBuf),
    Directory(PathBuf),
}

impl WatchTarget {
    /// Stat `path` and classify it.
    pub fn resolve(fs: &dyn FileSystem, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let meta = fs.metadata(&path).map_err(|source| BuildwatchError::Stat {
            path: path.clone(),
            source,
        })?;

        if meta.is_dir() {
            Ok(WatchTarget::Directory(path))
        } else {
            Ok(WatchTarget::File(path))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            WatchTarget::File(p) | WatchTarget::Directory(p) => p,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, WatchTarget::Directory(_))
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}
