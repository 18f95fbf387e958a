//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads flow
//! through this interface. No other module should import `git2`, and
//! nothing here writes to the object store, refs or index.
//!
//! # Responsibilities
//!
//! - Opening a repository at its root
//! - Working tree status (untracked and modified paths)
//! - HEAD resolution
//! - Branch enumeration (local and remote-tracking)
//! - Commit parent lookup for ancestry walks
//!
//! # Example
//!
//! ```ignore
//! use vstamp::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.head_oid()?;
//! for tip in git.list_branch_tips()? {
//!     println!("{} -> {}", tip.name, tip.oid.short(7));
//! }
//! ```

mod interface;

pub use interface::{BranchTip, Git, GitError, RepoInfo, WorktreeStatus};
