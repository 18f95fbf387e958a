//! version::depth
//!
//! Depth of a commit: the size of its ancestor closure, the commit itself
//! included. Every parent edge is followed, so merge commits count the
//! history of all their parents. The result equals
//! `git rev-list --count <commit>`.

use std::collections::HashSet;

use super::graph::CommitGraph;
use crate::core::types::Oid;
use crate::git::GitError;

/// Count the distinct commits reachable from `id`, including `id`.
///
/// Runs in time proportional to the ancestor closure.
///
/// # Errors
///
/// Propagates any failure to read a commit along the way.
pub fn depth<G: CommitGraph + ?Sized>(graph: &G, id: &Oid) -> Result<u64, GitError> {
    let mut seen: HashSet<Oid> = HashSet::new();
    let mut worklist = vec![id.clone()];

    while let Some(commit) = worklist.pop() {
        if !seen.insert(commit.clone()) {
            continue;
        }
        for parent in graph.parents(&commit)? {
            if !seen.contains(&parent) {
                worklist.push(parent);
            }
        }
    }

    Ok(seen.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::graph::memory::{oid, MemoryGraph};

    #[test]
    fn root_commit_has_depth_one() {
        let root = oid("01", '0');
        let mut graph = MemoryGraph::default();
        graph.commit(&root, &[]);

        assert_eq!(depth(&graph, &root).unwrap(), 1);
    }

    #[test]
    fn linear_history() {
        let c1 = oid("01", '0');
        let c2 = oid("02", '0');
        let c3 = oid("03", '0');
        let mut graph = MemoryGraph::default();
        graph.commit(&c1, &[]).commit(&c2, &[&c1]).commit(&c3, &[&c2]);

        assert_eq!(depth(&graph, &c3).unwrap(), 3);
        assert_eq!(depth(&graph, &c2).unwrap(), 2);
    }

    #[test]
    fn merge_counts_shared_history_once() {
        //   root - a - merge
        //      \- b -/
        let root = oid("01", '0');
        let a = oid("02", '0');
        let b = oid("03", '0');
        let merge = oid("04", '0');
        let mut graph = MemoryGraph::default();
        graph
            .commit(&root, &[])
            .commit(&a, &[&root])
            .commit(&b, &[&root])
            .commit(&merge, &[&a, &b]);

        assert_eq!(depth(&graph, &merge).unwrap(), 4);
    }

    #[test]
    fn multiple_roots_are_all_counted() {
        let left = oid("01", '0');
        let right = oid("02", '0');
        let merge = oid("03", '0');
        let mut graph = MemoryGraph::default();
        graph
            .commit(&left, &[])
            .commit(&right, &[])
            .commit(&merge, &[&left, &right]);

        assert_eq!(depth(&graph, &merge).unwrap(), 3);
    }

    #[test]
    fn missing_commit_is_an_error() {
        let graph = MemoryGraph::default();
        let result = depth(&graph, &oid("ff", 'f'));
        assert!(matches!(result, Err(GitError::ObjectNotFound { .. })));
    }
}
