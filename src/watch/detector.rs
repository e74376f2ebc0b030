// src/watch/detector.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::{BuildwatchError, Result};
use crate::fs::{EntryKind, FileSystem};
use crate::watch::index::ModTimeIndex;
use crate::watch::report::ChangeReport;
use crate::watch::target::WatchTarget;

/// Polls a [`WatchTarget`] and reports which source files changed since the
/// previous poll.
///
/// The detector owns its [`ModTimeIndex`], so independent detectors never
/// share state. Polling mutates the index: two polls without intervening
/// edits report changes only the first time.
#[derive(Debug)]
pub struct ChangeDetector {
    fs: Arc<dyn FileSystem>,
    target: WatchTarget,
    /// Lowercased, without leading dot.
    extensions: Vec<String>,
    index: ModTimeIndex,
}

impl ChangeDetector {
    /// Create a detector for `target`.
    ///
    /// `extensions` only apply in directory mode; a file target is watched
    /// regardless of its name. They are matched case-insensitively and may be
    /// given with or without the leading dot.
    pub fn new<S: AsRef<str>>(
        fs: Arc<dyn FileSystem>,
        target: WatchTarget,
        extensions: &[S],
    ) -> Self {
        let extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            fs,
            target,
            extensions,
            index: ModTimeIndex::new(),
        }
    }

    pub fn target(&self) -> &WatchTarget {
        &self.target
    }

    pub fn index(&self) -> &ModTimeIndex {
        &self.index
    }

    /// Run one poll cycle.
    ///
    /// Any stat or directory-listing error aborts the poll; the index may
    /// already contain updates for paths visited before the failure.
    pub fn poll(&mut self) -> Result<ChangeReport> {
        let root = self.target.path().to_path_buf();
        let meta = self
            .fs
            .metadata(&root)
            .map_err(|source| BuildwatchError::Stat {
                path: root.clone(),
                source,
            })?;

        let mut changed = Vec::new();
        match self.target {
            WatchTarget::File(_) => {
                if self.index.observe(&root, meta.modified) {
                    changed.push(root);
                }
            }
            WatchTarget::Directory(_) => {
                self.walk_dir(&root, &mut changed)?;
            }
        }

        debug!(
            target = %self.target,
            changed = changed.len(),
            indexed = self.index.len(),
            "poll complete"
        );
        Ok(ChangeReport::new(changed))
    }

    /// Depth-first walk visiting the entries of each directory in sorted
    /// order, so the report order is stable across polls.
    fn walk_dir(&mut self, dir: &Path, changed: &mut Vec<PathBuf>) -> Result<()> {
        let mut entries = self
            .fs
            .read_dir(dir)
            .map_err(|source| BuildwatchError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
        entries.sort();

        for entry in entries {
            let meta = self
                .fs
                .symlink_metadata(&entry)
                .map_err(|source| BuildwatchError::Stat {
                    path: entry.clone(),
                    source,
                })?;

            match meta.kind {
                EntryKind::Dir => self.walk_dir(&entry, changed)?,
                EntryKind::File if self.matches_extension(&entry) => {
                    if self.index.observe(&entry, meta.modified) {
                        trace!(path = ?entry, "changed");
                        changed.push(entry);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| {
            name.len() > ext.len()
                && name.ends_with(ext.as_str())
                && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
        })
    }
}
