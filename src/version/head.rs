//! version::head
//!
//! Resolving the commit that HEAD points at.

use std::path::Path;

use super::VersionError;
use crate::core::types::Oid;
use crate::git::{Git, GitError};

/// Resolve HEAD to a commit id.
///
/// `root` is only used to name the repository in errors.
///
/// # Errors
///
/// [`VersionError::UnresolvableHead`] if the repository has no commits or
/// HEAD cannot be dereferenced. Other read failures surface as
/// [`VersionError::Git`].
pub fn resolve(git: &Git, root: &Path) -> Result<Oid, VersionError> {
    git.head_oid().map_err(|source| match source {
        GitError::UnbornHead | GitError::RefNotFound { .. } | GitError::ObjectNotFound { .. } => {
            VersionError::UnresolvableHead {
                path: root.to_path_buf(),
                source,
            }
        }
        other => VersionError::Git(other),
    })
}
