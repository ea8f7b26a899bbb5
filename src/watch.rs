//! Noticing when the files behind an outline change on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Clone, Debug, Default)]
/// Modification times of a set of files as of the last check.
pub struct FileWatch {
    paths: Vec<PathBuf>,
    stamps: Vec<Option<SystemTime>>,
}

fn stamp(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

impl FileWatch {
    #[must_use]
    /// Starts watching `paths`, taking their current modification times as the baseline.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let stamps = paths.iter().map(PathBuf::as_path).map(stamp).collect();
        Self { paths, stamps }
    }

    #[must_use]
    /// Files being watched.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Replaces the watched set, e.g. after a rebuild discovered new inclusions.
    pub fn retarget(&mut self, paths: Vec<PathBuf>) {
        if paths != self.paths {
            *self = Self::new(paths);
        }
    }

    /// Whether any file was modified, created or removed since the previous call.
    pub fn changed(&mut self) -> bool {
        let current: Vec<_> = self.paths.iter().map(PathBuf::as_path).map(stamp).collect();
        let changed = current != self.stamps;
        self.stamps = current;
        changed
    }
}

#[cfg(test)]
#[path = "tests/watch.rs"]
mod tests;
