//! Integration tests for version generation against real repositories.

mod common;

use std::path::PathBuf;

use tempfile::TempDir;

use common::{run_git, TestRepo};
use vstamp::core::types::AbbrevLength;
use vstamp::git::Git;
use vstamp::version::{
    self, default_output_path, depth::depth, write_artifact, Template, VersionConfig, VersionError,
};

fn config(repo: &TestRepo) -> VersionConfig {
    VersionConfig::new(repo.path())
}

fn abbrev(len: u32) -> AbbrevLength {
    AbbrevLength::new(len).unwrap()
}

// =============================================================================
// Basic Versions
// =============================================================================

#[test]
fn single_commit_is_depth_one() {
    let repo = TestRepo::new();
    let head = repo.head_oid();

    let version = version::generate(&config(&repo)).unwrap();

    assert_eq!(version.formatted_version, format!("1.{}", &head.as_str()[..12]));
    assert_eq!(version.full_hash, head.as_str());
}

#[test]
fn linear_history_counts_every_commit() {
    let repo = TestRepo::new();
    repo.commit_many("file", 4);
    let head = repo.head_oid();

    let version = version::generate(&config(&repo).with_abbrev_length(abbrev(8))).unwrap();

    assert_eq!(version.formatted_version, format!("5.{}", &head.as_str()[..8]));
}

#[test]
fn prefix_and_template_applied() {
    let repo = TestRepo::new();
    repo.commit_many("file", 2);
    let head = repo.head_oid();

    let version = version::generate(
        &config(&repo)
            .with_prefix("v")
            .with_template(Template::parse("{hash}-r{depth}").unwrap())
            .with_abbrev_length(abbrev(8)),
    )
    .unwrap();

    assert_eq!(
        version.formatted_version,
        format!("v{}-r3", &head.as_str()[..8])
    );
}

#[test]
fn positional_template() {
    let repo = TestRepo::new();
    let head = repo.head_oid();

    let version = version::generate(
        &config(&repo).with_template(Template::parse("build {} ({})").unwrap()),
    )
    .unwrap();

    assert_eq!(
        version.formatted_version,
        format!("build 1 ({})", &head.as_str()[..12])
    );
}

#[test]
fn sanitize_only_changes_display() {
    let repo = TestRepo::new();
    let head = repo.head_oid();
    let short = &head.as_str()[..12];

    let version = version::generate(&config(&repo).with_sanitize(true)).unwrap();

    let expected: String = short
        .chars()
        .flat_map(|c| match c {
            'a' | 'b' => vec![c, '_'],
            _ => vec![c],
        })
        .collect();
    assert_eq!(version.formatted_version, format!("1.{}", expected));
    assert_eq!(version.full_hash, head.as_str());
}

#[test]
fn generation_is_deterministic() {
    let repo = TestRepo::new();
    repo.commit_many("file", 3);

    let first = version::generate(&config(&repo)).unwrap();
    let second = version::generate(&config(&repo)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn nested_plain_directory_is_not_a_repository() {
    let repo = TestRepo::new();
    repo.commit_file("vendored/lib.rs", "\n", "Add vendored");
    let nested = repo.path().join("vendored");

    let err = version::generate(&VersionConfig::new(&nested)).unwrap_err();
    match err {
        VersionError::RepositoryOpen { path, .. } => assert_eq!(path, nested),
        other => panic!("expected RepositoryOpen, got {other:?}"),
    }
}

// =============================================================================
// Depth
// =============================================================================

#[test]
fn depth_matches_rev_list_across_merges() {
    let repo = TestRepo::new();
    repo.commit_many("base", 2);
    repo.git(&["checkout", "-q", "-b", "feature"]);
    repo.commit_many("feature", 3);
    repo.git(&["checkout", "-q", "main"]);
    repo.commit_many("main", 2);
    repo.git(&["merge", "-q", "--no-ff", "-m", "Merge feature", "feature"]);

    let git = Git::open(repo.path()).unwrap();
    let head = repo.head_oid();

    // 1 root + 2 base + 3 feature + 2 main + merge
    assert_eq!(depth(&git, &head).unwrap(), 9);
    assert_eq!(depth(&git, &head).unwrap(), repo.rev_list_count("HEAD"));

    let version = version::generate(&config(&repo)).unwrap();
    assert!(version.formatted_version.starts_with("9."));
}

#[test]
fn sibling_branches_with_equal_depth_do_not_collide_at_default_length() {
    let repo = TestRepo::new();
    repo.git(&["checkout", "-q", "-b", "left"]);
    repo.commit_file("left.txt", "l\n", "Left");
    repo.git(&["checkout", "-q", "main"]);
    repo.commit_file("right.txt", "r\n", "Right");

    let version = version::generate(&config(&repo)).unwrap();
    assert!(version.formatted_version.starts_with("2."));
}

// =============================================================================
// Dirty Working Copies
// =============================================================================

#[test]
fn untracked_file_refused() {
    let repo = TestRepo::new();
    std::fs::write(repo.path().join("scratch.txt"), "tmp").unwrap();

    let err = version::generate(&config(&repo)).unwrap_err();
    match err {
        VersionError::DirtyRepository {
            untracked,
            modified,
            ..
        } => {
            assert!(untracked.contains(&PathBuf::from("scratch.txt")));
            assert!(modified.is_empty());
        }
        other => panic!("expected DirtyRepository, got {other:?}"),
    }
}

#[test]
fn modified_file_refused() {
    let repo = TestRepo::new();
    std::fs::write(repo.path().join("README.md"), "changed\n").unwrap();

    let err = version::generate(&config(&repo)).unwrap_err();
    assert!(err.to_string().contains("uncommitted changes: [README.md]"));
}

#[test]
fn dirty_allowed_versions_head() {
    let repo = TestRepo::new();
    let head = repo.head_oid();
    std::fs::write(repo.path().join("scratch.txt"), "tmp").unwrap();

    let version = version::generate(&config(&repo).with_allow_dirty(true)).unwrap();
    assert_eq!(version.full_hash, head.as_str());
}

// =============================================================================
// Failure Modes
// =============================================================================

#[test]
fn not_a_repository() {
    let dir = TempDir::new().unwrap();
    let err = version::generate(&VersionConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, VersionError::RepositoryOpen { .. }));
}

#[test]
fn bare_repository_rejected() {
    let dir = TempDir::new().unwrap();
    run_git(dir.path(), &["init", "-q", "--bare"]);
    let err = version::generate(&VersionConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, VersionError::RepositoryOpen { .. }));
}

#[test]
fn unborn_head() {
    let repo = TestRepo::empty();
    let err = version::generate(&config(&repo)).unwrap_err();
    assert!(matches!(err, VersionError::UnresolvableHead { .. }));
}

// =============================================================================
// Remote-Tracking Branches
// =============================================================================

#[test]
fn remote_tracking_branches_are_scanned() {
    let upstream = TestRepo::new();
    upstream.git(&["checkout", "-q", "-b", "release"]);
    upstream.commit_many("release", 3);
    upstream.git(&["checkout", "-q", "main"]);

    let dir = TempDir::new().unwrap();
    run_git(
        dir.path(),
        &["clone", "-q", upstream.path().to_str().unwrap(), "clone"],
    );
    let clone = dir.path().join("clone");

    // Without a forced collision the scan simply succeeds
    let version = version::generate(&VersionConfig::new(&clone)).unwrap();
    assert!(version.formatted_version.starts_with("1."));
}

// =============================================================================
// Artifact
// =============================================================================

#[test]
fn artifact_written_under_repository_root() {
    let repo = TestRepo::new();
    let version = version::generate(&config(&repo)).unwrap();

    let path = default_output_path(repo.path());
    write_artifact(&path, &version).unwrap();

    assert!(path.ends_with("build/generated/version/version.txt"));
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        format!("{}\n{}", version.formatted_version, version.full_hash)
    );
}

#[test]
fn artifact_rewrite_is_idempotent() {
    let repo = TestRepo::new();
    let version = version::generate(&config(&repo)).unwrap();
    let path = repo.path().join("out/version.txt");

    write_artifact(&path, &version).unwrap();
    let first = std::fs::read(&path).unwrap();
    write_artifact(&path, &version).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), first);
}
