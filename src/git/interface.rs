//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! vstamp. Every repository read flows through this interface, which
//! provides structured results and normalizes errors into typed failure
//! categories.
//!
//! # Architecture
//!
//! The `Git` struct is the only way to interact with a Git repository.
//! No other module should import `git2` directly. This ensures:
//!
//! - Consistent error handling across all Git operations
//! - Strong type guarantees at the boundary
//! - Read-only access: nothing here writes objects, refs or the index
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: Repository has no working directory
//! - [`GitError::UnbornHead`]: HEAD points at a branch with no commits
//! - [`GitError::RefNotFound`]: Requested ref does not exist
//! - [`GitError::ObjectNotFound`]: Commit missing from the object database
//!
//! # Example
//!
//! ```ignore
//! use vstamp::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.head_oid()?;
//! println!("HEAD is at {}", head.short(7));
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::types::{Oid, TypeError};

/// Errors from Git operations.
///
/// The categorization lets higher layers map failures onto the version
/// error kinds (an unborn HEAD is not the same failure as a corrupt object
/// database).
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// HEAD refers to a branch that has no commits yet.
    #[error("HEAD points to an unborn branch")]
    UnbornHead,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::UnbornBranch => GitError::UnbornHead,
            git2::ErrorCode::NotFound => {
                if context.starts_with("refs/") || context == "HEAD" {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::UnbornBranch => GitError::UnbornHead,
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: err.message().to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            other => GitError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Information about a Git repository.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    /// Path to .git directory
    pub git_dir: PathBuf,
    /// Path to working directory
    pub work_dir: PathBuf,
}

/// A branch reference and the commit it points to.
///
/// Covers both local (`refs/heads/*`) and remote-tracking
/// (`refs/remotes/*`) branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTip {
    /// The full ref name
    pub name: String,
    /// The commit the branch points to
    pub oid: Oid,
}

/// Paths that differ between the working copy and HEAD.
///
/// Both sets hold paths relative to the working directory. They are
/// disjoint: a path is untracked only if it is unknown to the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeStatus {
    /// Files on disk that were never tracked (ignored files excluded)
    pub untracked: BTreeSet<PathBuf>,
    /// Tracked files with staged or unstaged modifications
    pub modified: BTreeSet<PathBuf>,
}

impl WorktreeStatus {
    /// Check if the worktree is completely clean (no changes at all).
    pub fn is_clean(&self) -> bool {
        self.untracked.is_empty() && self.modified.is_empty()
    }
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. All repository
/// reads flow through this interface. No other module should import `git2`
/// directly.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open the repository rooted at the given path.
    ///
    /// `path` must be the work tree root or its `.git` directory. Parent
    /// directories are not searched, so a plain directory nested inside
    /// another repository is not a repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `path` is not a repository root
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open_ext(
            path,
            git2::RepositoryOpenFlags::NO_SEARCH,
            std::iter::empty::<&std::ffi::OsStr>(),
        )
        .map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        // A bare repository has no working copy to inspect
        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Get repository information (git_dir and work_dir paths).
    pub fn info(&self) -> Result<RepoInfo, GitError> {
        let git_dir = self.repo.path().to_path_buf();
        let work_dir = self.repo.workdir().ok_or(GitError::BareRepo)?.to_path_buf();

        Ok(RepoInfo { git_dir, work_dir })
    }

    // =========================================================================
    // Working Tree Status
    // =========================================================================

    /// Collect untracked and modified paths.
    ///
    /// Untracked directories are recursed so every file is listed by name.
    /// Ignored files are never reported. Staged and unstaged changes to a
    /// tracked file both land in `modified`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let status = git.worktree_status()?;
    /// for path in &status.untracked {
    ///     println!("?? {}", path.display());
    /// }
    /// ```
    pub fn worktree_status(&self) -> Result<WorktreeStatus, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

        let mut result = WorktreeStatus::default();

        for entry in statuses.iter() {
            let status = entry.status();
            let Some(path) = entry.path() else {
                // Non-UTF8 paths still make the tree dirty
                let lossy = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                result.modified.insert(PathBuf::from(lossy));
                continue;
            };
            let path = PathBuf::from(path);

            if status.is_wt_new() && !status.is_index_new() {
                result.untracked.insert(path);
                continue;
            }

            if status.is_conflicted()
                || status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange()
                || status.is_wt_modified()
                || status.is_wt_deleted()
                || status.is_wt_renamed()
                || status.is_wt_typechange()
            {
                result.modified.insert(path);
            }
        }

        Ok(result)
    }

    // =========================================================================
    // Ref Resolution
    // =========================================================================

    /// Get HEAD commit OID.
    ///
    /// Detached HEAD resolves to the commit it points at.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnbornHead`] if HEAD is unborn (new repository)
    /// - [`GitError::RefNotFound`] if HEAD is missing entirely
    pub fn head_oid(&self) -> Result<Oid, GitError> {
        let head = self
            .repo
            .head()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;

        let oid = head
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?
            .id();

        Ok(Oid::new(oid.to_string())?)
    }

    // =========================================================================
    // Ref Enumeration
    // =========================================================================

    /// List every local and remote-tracking branch with its tip commit.
    ///
    /// Symbolic branches such as `refs/remotes/origin/HEAD` are resolved.
    /// Branches that do not peel to a commit are skipped.
    pub fn list_branch_tips(&self) -> Result<Vec<BranchTip>, GitError> {
        let branches = self.repo.branches(None).map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;

        let mut tips = Vec::new();
        for branch in branches {
            let (branch, _) = branch.map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;
            let reference = branch.get();

            let name = match reference.name() {
                Some(n) => n.to_string(),
                None => continue, // Skip refs with non-UTF8 names
            };

            let commit = match reference.peel_to_commit() {
                Ok(commit) => commit,
                Err(e) => {
                    debug!("skipping branch '{}': {}", name, e.message());
                    continue;
                }
            };

            tips.push(BranchTip {
                name,
                oid: Oid::new(commit.id().to_string())?,
            });
        }

        Ok(tips)
    }

    // =========================================================================
    // Commit Information
    // =========================================================================

    /// Get the parent OIDs of a commit.
    ///
    /// Returns empty vec for root commits, multiple OIDs for merge commits.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if the commit doesn't exist
    pub fn commit_parents(&self, oid: &Oid) -> Result<Vec<Oid>, GitError> {
        let git_oid =
            git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let commit = self
            .repo
            .find_commit(git_oid)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let mut parents = Vec::with_capacity(commit.parent_count());
        for parent_id in commit.parent_ids() {
            parents.push(Oid::new(parent_id.to_string())?);
        }

        Ok(parents)
    }
}
