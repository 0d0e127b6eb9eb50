//! Per-path exclusion for concurrent acquisitions in one process.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Set of destination paths currently being produced.
#[derive(Debug, Default)]
pub(crate) struct PathLocks {
    busy: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

impl PathLocks {
    fn busy(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.busy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until no other caller holds `path`, then holds it until the guard drops.
    pub(crate) fn lock(&self, path: &Path) -> PathGuard<'_> {
        let mut busy = self.busy();
        while busy.contains(path) {
            busy = self
                .released
                .wait(busy)
                .unwrap_or_else(PoisonError::into_inner);
        }
        busy.insert(path.to_path_buf());
        PathGuard {
            locks: self,
            path: path.to_path_buf(),
        }
    }
}

/// Releases the path on drop.
pub(crate) struct PathGuard<'a> {
    locks: &'a PathLocks,
    path: PathBuf,
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.locks.busy().remove(&self.path);
        self.locks.released.notify_all();
    }
}
