// src/watch/index.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Last observed modification time per path.
///
/// The index only ever grows: paths are inserted on first sight and never
/// removed (deleted files simply stop being observed), and a stored
/// timestamp is only ever replaced by a strictly newer one.
#[derive(Debug, Default, Clone)]
pub struct ModTimeIndex {
    entries: HashMap<PathBuf, SystemTime>,
}

impl ModTimeIndex {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Record an observation of `path`.
    ///
    /// Returns `true` if the path counts as changed: either it was never seen
    /// before, or `modified` is strictly newer than the stored time. An older
    /// or equal timestamp leaves the index untouched.
    pub fn observe(&mut self, path: &Path, modified: SystemTime) -> bool {
        match self.entries.get_mut(path) {
            None => {
                self.entries.insert(path.to_path_buf(), modified);
                true
            }
            Some(stored) if modified > *stored => {
                *stored = modified;
                true
            }
            Some(_) => false,
        }
    }

    pub fn get(&self, path: &Path) -> Option<SystemTime> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
