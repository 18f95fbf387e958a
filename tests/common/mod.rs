//! Shared fixtures for integration tests.
//!
//! Repositories are built with the `git` CLI in temporary directories so
//! that tests observe exactly what a user's checkout would contain.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use vstamp::core::types::Oid;

/// Test fixture that creates a real git repository.
pub struct TestRepo {
    pub dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit on `main`.
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.commit_file("README.md", "# Test Repo\n", "Initial commit");
        repo
    }

    /// Create a repository without any commits.
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init", "-q", "-b", "main"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);

        Self { dir }
    }

    /// Get the path to the repository.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file and commit it, returning the new commit OID.
    pub fn commit_file(&self, path: &str, content: &str, message: &str) -> Oid {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
        self.git(&["add", path]);
        self.git(&["commit", "-q", "-m", message]);
        self.head_oid()
    }

    /// Commit `count` files named `<stem>-<i>.txt`.
    pub fn commit_many(&self, stem: &str, count: usize) -> Oid {
        let mut last = self.head_oid();
        for i in 0..count {
            let name = format!("{}-{}.txt", stem, i);
            last = self.commit_file(&name, &format!("{}\n", i), &format!("Add {}", name));
        }
        last
    }

    /// Run a git command in the repository.
    pub fn git(&self, args: &[&str]) {
        run_git(self.path(), args);
    }

    /// Run a git command and capture trimmed stdout.
    pub fn git_output(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("git command failed");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    /// Get HEAD OID using git directly.
    pub fn head_oid(&self) -> Oid {
        Oid::new(self.git_output(&["rev-parse", "HEAD"])).unwrap()
    }

    /// Commit count reported by `git rev-list --count`.
    pub fn rev_list_count(&self, rev: &str) -> u64 {
        self.git_output(&["rev-list", "--count", rev]).parse().unwrap()
    }
}

/// Run a git command in the given directory.
pub fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
