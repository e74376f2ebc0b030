// src/watch/report.rs

use std::fmt;
use std::path::PathBuf;

/// Paths found changed in one poll cycle, in traversal order.
///
/// The full list is always kept; only [`ChangeReport::summary`] shortens it
/// for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    paths: Vec<PathBuf>,
}

impl ChangeReport {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// `true` iff at least one path changed.
    pub fn changed(&self) -> bool {
        !self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Display form listing at most `max_listed` entries.
    ///
    /// When the report is longer, the first `max_listed - 1` paths are shown
    /// followed by a `... +N more` placeholder, so `max_listed = 3` renders
    /// five paths as `a,b,... +3 more`.
    pub fn summary(&self, max_listed: usize) -> ChangeSummary<'_> {
        ChangeSummary {
            paths: &self.paths,
            max_listed: max_listed.max(2),
        }
    }
}

impl FromIterator<PathBuf> for ChangeReport {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Borrowed, display-only view of a [`ChangeReport`].
#[derive(Debug, Clone, Copy)]
pub struct ChangeSummary<'a> {
    paths: &'a [PathBuf],
    max_listed: usize,
}

impl fmt::Display for ChangeSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (shown, hidden) = if self.paths.len() > self.max_listed {
            let keep = self.max_listed - 1;
            (&self.paths[..keep], self.paths.len() - keep)
        } else {
            (self.paths, 0)
        };

        for (i, path) in shown.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", path.display())?;
        }
        if hidden > 0 {
            write!(f, ",... +{hidden} more")?;
        }
        Ok(())
    }
}
