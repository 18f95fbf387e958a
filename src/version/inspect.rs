//! version::inspect
//!
//! Opening a repository and reporting whether its working copy is clean.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::VersionError;
use crate::git::{Git, WorktreeStatus};

/// Working copy cleanliness, computed fresh for each generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryState {
    /// True when nothing is untracked or modified
    pub clean: bool,
    /// Files on disk that were never tracked
    pub untracked: BTreeSet<PathBuf>,
    /// Tracked files with staged or unstaged changes
    pub modified: BTreeSet<PathBuf>,
}

impl From<WorktreeStatus> for RepositoryState {
    fn from(status: WorktreeStatus) -> Self {
        Self {
            clean: status.is_clean(),
            untracked: status.untracked,
            modified: status.modified,
        }
    }
}

/// Open the repository containing `root`.
///
/// # Errors
///
/// [`VersionError::RepositoryOpen`] if `root` is not inside a repository
/// with a working copy.
pub fn open(root: &Path) -> Result<Git, VersionError> {
    Git::open(root).map_err(|source| VersionError::RepositoryOpen {
        path: root.to_path_buf(),
        source,
    })
}

/// Report untracked and modified paths of an open repository.
pub fn inspect(git: &Git) -> Result<RepositoryState, VersionError> {
    Ok(git.worktree_status()?.into())
}

/// Fail unless `state` is clean or dirtiness is tolerated.
///
/// # Errors
///
/// [`VersionError::DirtyRepository`] listing both path sets.
pub fn require_clean(
    root: &Path,
    state: RepositoryState,
    allow_dirty: bool,
) -> Result<(), VersionError> {
    if state.clean || allow_dirty {
        return Ok(());
    }
    Err(VersionError::DirtyRepository {
        path: root.to_path_buf(),
        untracked: state.untracked,
        modified: state.modified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirty() -> RepositoryState {
        RepositoryState::from(WorktreeStatus {
            untracked: BTreeSet::from([PathBuf::from("scratch.txt")]),
            modified: BTreeSet::from([PathBuf::from("src/lib.rs")]),
        })
    }

    #[test]
    fn clean_status_is_clean_state() {
        let state = RepositoryState::from(WorktreeStatus::default());
        assert!(state.clean);
    }

    #[test]
    fn dirty_status_is_not_clean() {
        assert!(!dirty().clean);
    }

    #[test]
    fn dirty_rejected_by_default() {
        let err = require_clean(Path::new("/repo"), dirty(), false).unwrap_err();
        match err {
            VersionError::DirtyRepository {
                untracked,
                modified,
                ..
            } => {
                assert!(untracked.contains(Path::new("scratch.txt")));
                assert!(modified.contains(Path::new("src/lib.rs")));
            }
            other => panic!("expected dirty error, got {other:?}"),
        }
    }

    #[test]
    fn dirty_allowed_when_tolerated() {
        assert!(require_clean(Path::new("/repo"), dirty(), true).is_ok());
    }

    #[test]
    fn open_outside_repository_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = open(dir.path());
        assert!(matches!(result, Err(VersionError::RepositoryOpen { .. })));
    }
}
