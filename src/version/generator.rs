//! version::generator
//!
//! The generation pipeline. Each step short-circuits on failure:
//!
//! 1. Inspect the working copy; refuse a dirty one unless tolerated
//! 2. Resolve HEAD
//! 3. Abbreviate the HEAD hash
//! 4. Count HEAD's depth
//! 5. Scan every branch for a colliding commit
//! 6. Sanitize the displayed hash if requested
//! 7. Render prefix and template
//!
//! Sanitizing happens after the collision scan and only affects the
//! displayed string; collisions are always judged on the raw abbreviation.
//! Nothing is cached between calls.

use tracing::debug;

use super::abbrev::{abbreviate, sanitize};
use super::ambiguity::check;
use super::depth::depth;
use super::format::format;
use super::head::resolve;
use super::inspect::{inspect, open, require_clean};
use super::{GeneratedVersion, HeadMeta, VersionConfig, VersionError};

/// Compute the version of the repository described by `config`.
///
/// # Errors
///
/// - [`VersionError::RepositoryOpen`] if `config.root` is not a repository
/// - [`VersionError::DirtyRepository`] if the working copy has changes and
///   `allow_dirty` is off
/// - [`VersionError::UnresolvableHead`] if there is no HEAD commit
/// - [`VersionError::Ambiguous`] if another commit would get the same version
/// - [`VersionError::Git`] for any other read failure
pub fn generate(config: &VersionConfig) -> Result<GeneratedVersion, VersionError> {
    let git = open(&config.root)?;

    let state = inspect(&git)?;
    if !state.clean {
        debug!(
            untracked = state.untracked.len(),
            modified = state.modified.len(),
            allow_dirty = config.allow_dirty,
            "working copy has pending changes"
        );
    }
    require_clean(&config.root, state, config.allow_dirty)?;

    let commit = resolve(&git, &config.root)?;
    let abbreviated_hash = abbreviate(&commit, config.abbrev_length);
    let head_depth = depth(&git, &commit)?;
    debug!(head = %commit, depth = head_depth, abbrev = %abbreviated_hash, "resolved HEAD");

    let head = HeadMeta {
        commit,
        abbreviated_hash,
        depth: head_depth,
    };
    check(&git, &head, config.abbrev_length)?;

    let display_hash = if config.sanitize {
        sanitize(&head.abbreviated_hash)
    } else {
        head.abbreviated_hash.clone()
    };

    let formatted_version = format(
        &config.template,
        &config.version_prefix,
        head.depth,
        &display_hash,
    );
    debug!(version = %formatted_version, "generated version");

    Ok(GeneratedVersion {
        formatted_version,
        full_hash: head.commit.to_string(),
    })
}
