//! version::ambiguity
//!
//! Detection of commits that would render the same version as HEAD.
//!
//! A version encodes only `(depth, abbreviated hash)`. Two distinct commits
//! whose truncated hashes match and whose depths are equal would produce
//! identical version strings, so generation must refuse.
//!
//! # Walk
//!
//! Every branch tip, local and remote-tracking, is walked through all parent
//! edges. A colliding commit may live entirely outside HEAD's ancestry, so
//! HEAD's own branch is not enough. One examined set is shared by all walks:
//! a commit seen from an earlier tip has already had its ancestors queued,
//! so the whole scan is a single pass over the union of reachable commits.
//! Descent also stops at HEAD itself, whose ancestors all have a strictly
//! smaller depth and cannot collide.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use super::abbrev::abbreviate;
use super::depth::depth;
use super::graph::CommitGraph;
use super::{HeadMeta, VersionError};
use crate::core::types::{AbbrevLength, Oid};

/// Two distinct commits would render the same version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "found commit '{other}' with same abbreviated hash '{abbreviated_hash}' and depth {depth} \
     as HEAD ('{head}'); raise the abbreviation length to get a unique version"
)]
pub struct AmbiguityError {
    /// The HEAD commit being versioned
    pub head: Oid,
    /// The other commit sharing HEAD's version
    pub other: Oid,
    /// The shared abbreviated hash
    pub abbreviated_hash: String,
    /// The shared depth
    pub depth: u64,
}

/// Scan all branches for a commit that collides with `head`.
///
/// `abbrev_length` must be the length `head.abbreviated_hash` was built
/// with.
///
/// # Errors
///
/// - [`VersionError::Ambiguous`] on a collision with equal depth
/// - [`VersionError::Git`] if history cannot be read
pub fn check<G: CommitGraph + ?Sized>(
    graph: &G,
    head: &HeadMeta,
    abbrev_length: AbbrevLength,
) -> Result<(), VersionError> {
    let mut examined: HashSet<Oid> = HashSet::new();

    for tip in graph.branch_tips()? {
        debug!(branch = %tip.name, "checking branch for ambiguous commits");
        let mut worklist = vec![tip.oid];

        while let Some(commit) = worklist.pop() {
            if commit == head.commit || examined.contains(&commit) {
                continue;
            }

            let abbreviated = abbreviate(&commit, abbrev_length);
            if abbreviated == head.abbreviated_hash {
                let commit_depth = depth(graph, &commit)?;
                if commit_depth == head.depth {
                    return Err(AmbiguityError {
                        head: head.commit.clone(),
                        other: commit,
                        abbreviated_hash: abbreviated,
                        depth: commit_depth,
                    }
                    .into());
                }
                debug!(
                    commit = %commit,
                    depth = commit_depth,
                    head_depth = head.depth,
                    "same abbreviated hash '{}' as HEAD but different depth",
                    abbreviated
                );
            }

            worklist.extend(graph.parents(&commit)?);
            examined.insert(commit);
        }
    }

    Ok(())
}
