// src/fs/mock.rs

//! In-memory filesystem used by tests.
//!
//! Every entry carries its own modification time, so tests can simulate
//! edits (`touch`) and clock skew (`set_modified`) without sleeping.

use super::{EntryKind, FileMeta, FileSystem};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone)]
enum MockEntry {
    File { modified: SystemTime },
    Dir { children: Vec<String>, modified: SystemTime },
}

#[derive(Debug)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    clock: SystemTime,
}

/// Cheaply cloneable handle to a shared in-memory tree.
///
/// The tree always contains the root directory `"."`. Paths are used as
/// given, so tests should consistently write them as `./dir/file.go`.
#[derive(Debug, Clone)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystem {
    pub fn new() -> Self {
        let clock = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let mut entries = HashMap::new();
        // Ensure root exists
        entries.insert(
            PathBuf::from("."),
            MockEntry::Dir {
                children: Vec::new(),
                modified: clock,
            },
        );

        Self {
            state: Arc::new(Mutex::new(MockState { entries, clock })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add (or replace) a file, stamped with the current mock clock.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let mut state = self.lock();
        let modified = state.clock;
        Self::insert(&mut state, path.as_ref(), MockEntry::File { modified });
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.lock();
        let modified = state.clock;
        Self::insert(
            &mut state,
            path.as_ref(),
            MockEntry::Dir {
                children: Vec::new(),
                modified,
            },
        );
    }

    /// Advance the mock clock and stamp `path` with the new time.
    ///
    /// Returns the new modification time.
    pub fn touch(&self, path: impl AsRef<Path>) -> io::Result<SystemTime> {
        let mut state = self.lock();
        state.clock += Duration::from_secs(1);
        let now = state.clock;
        Self::stamp(&mut state, path.as_ref(), now)?;
        Ok(now)
    }

    /// Set the modification time of `path` to an arbitrary value (which may
    /// be older than the current one).
    pub fn set_modified(&self, path: impl AsRef<Path>, modified: SystemTime) -> io::Result<()> {
        let mut state = self.lock();
        Self::stamp(&mut state, path.as_ref(), modified)
    }

    /// Remove a file or an (empty or not) directory entry.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        state.entries.remove(path);
        if let (Some(parent), Some(name)) = (parent_of(path), path.file_name()) {
            let name = name.to_string_lossy();
            if let Some(MockEntry::Dir { children, .. }) = state.entries.get_mut(&parent) {
                children.retain(|c| c.as_str() != name);
            }
        }
    }

    fn stamp(state: &mut MockState, path: &Path, time: SystemTime) -> io::Result<()> {
        match state.entries.get_mut(path) {
            Some(MockEntry::File { modified }) | Some(MockEntry::Dir { modified, .. }) => {
                *modified = time;
                Ok(())
            }
            None => Err(not_found(path)),
        }
    }

    fn insert(state: &mut MockState, path: &Path, entry: MockEntry) {
        // Ensure parent directories exist implicitly for simplicity in this mock
        if let Some(parent) = parent_of(path) {
            if !state.entries.contains_key(&parent) {
                let dir = MockEntry::Dir {
                    children: Vec::new(),
                    modified: state.clock,
                };
                Self::insert(state, &parent, dir);
            }
            if let (Some(MockEntry::Dir { children, .. }), Some(name)) =
                (state.entries.get_mut(&parent), path.file_name())
            {
                let name = name.to_string_lossy().into_owned();
                if !children.contains(&name) {
                    children.push(name);
                }
            }
        }
        state.entries.insert(path.to_path_buf(), entry);
    }
}

/// Parent of a mock path, mapping `""` to the root `"."`.
fn parent_of(path: &Path) -> Option<PathBuf> {
    let parent = path.parent()?;
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    // Avoid infinite loop at root
    (parent != path).then(|| parent.to_path_buf())
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("File not found: {:?}", path))
}

impl FileSystem for MockFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<FileMeta> {
        let state = self.lock();
        match state.entries.get(path) {
            Some(MockEntry::File { modified }) => Ok(FileMeta {
                kind: EntryKind::File,
                modified: *modified,
            }),
            Some(MockEntry::Dir { modified, .. }) => Ok(FileMeta {
                kind: EntryKind::Dir,
                modified: *modified,
            }),
            None => Err(not_found(path)),
        }
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMeta> {
        // The mock has no symlinks.
        self.metadata(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.lock();
        match state.entries.get(path) {
            Some(MockEntry::Dir { children, .. }) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            Some(MockEntry::File { .. }) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("Not a directory: {:?}", path),
            )),
            None => Err(not_found(path)),
        }
    }
}
