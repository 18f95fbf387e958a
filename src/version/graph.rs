//! version::graph
//!
//! The read-only view of commit history that the depth and ambiguity walks
//! need. [`Git`] is the production implementation; tests supply in-memory
//! graphs with hand-picked ids to force hash collisions.

use crate::core::types::Oid;
use crate::git::{BranchTip, Git, GitError};

/// Parent edges and branch tips of a repository.
pub trait CommitGraph {
    /// Parents of `id`, empty for a root commit.
    fn parents(&self, id: &Oid) -> Result<Vec<Oid>, GitError>;

    /// Every local and remote-tracking branch tip.
    fn branch_tips(&self) -> Result<Vec<BranchTip>, GitError>;
}

impl CommitGraph for Git {
    fn parents(&self, id: &Oid) -> Result<Vec<Oid>, GitError> {
        self.commit_parents(id)
    }

    fn branch_tips(&self) -> Result<Vec<BranchTip>, GitError> {
        self.list_branch_tips()
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// In-memory commit graph for unit tests.
    ///
    /// Records how often each commit's parents were read.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryGraph {
        parents: HashMap<Oid, Vec<Oid>>,
        branches: Vec<BranchTip>,
        reads: RefCell<HashMap<Oid, usize>>,
    }

    /// Build a 40-char oid from a short hex prefix, padded with a fill digit.
    pub(crate) fn oid(prefix: &str, fill: char) -> Oid {
        let mut hex = prefix.to_string();
        while hex.len() < 40 {
            hex.push(fill);
        }
        Oid::new(hex).unwrap()
    }

    impl MemoryGraph {
        pub(crate) fn commit(&mut self, id: &Oid, parents: &[&Oid]) -> &mut Self {
            self.parents
                .insert(id.clone(), parents.iter().map(|p| (*p).clone()).collect());
            self
        }

        /// Number of `parents` calls made for `id`.
        pub(crate) fn parent_reads(&self, id: &Oid) -> usize {
            self.reads.borrow().get(id).copied().unwrap_or(0)
        }

        pub(crate) fn remote_branch(&mut self, name: &str, tip: &Oid) -> &mut Self {
            self.branches.push(BranchTip {
                name: format!("refs/remotes/{}", name),
                oid: tip.clone(),
            });
            self
        }

        pub(crate) fn branch(&mut self, name: &str, tip: &Oid) -> &mut Self {
            self.branches.push(BranchTip {
                name: format!("refs/heads/{}", name),
                oid: tip.clone(),
            });
            self
        }
    }

    impl CommitGraph for MemoryGraph {
        fn parents(&self, id: &Oid) -> Result<Vec<Oid>, GitError> {
            *self.reads.borrow_mut().entry(id.clone()).or_insert(0) += 1;
            self.parents
                .get(id)
                .cloned()
                .ok_or_else(|| GitError::ObjectNotFound {
                    oid: id.to_string(),
                })
        }

        fn branch_tips(&self) -> Result<Vec<BranchTip>, GitError> {
            Ok(self.branches.clone())
        }
    }
}
