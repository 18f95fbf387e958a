//! version
//!
//! Deterministic build versions derived from Git history.
//!
//! A version is `prefix + template(depth, abbreviated_hash)`, where depth is
//! the number of commits in HEAD's ancestor closure. Before a version is
//! handed out, every branch is scanned so that no other commit could render
//! the same string.
//!
//! # Modules
//!
//! - [`inspect`] - Open a repository and report working copy cleanliness
//! - [`head`] - Resolve HEAD to a commit
//! - [`abbrev`] - Hash abbreviation and sanitizing
//! - [`depth`] - Ancestor closure size
//! - [`ambiguity`] - Cross-branch collision detection
//! - [`format`] - Version templates
//! - [`generator`] - The full pipeline
//! - [`artifact`] - Writing the two-line version file
//!
//! # Example
//!
//! ```no_run
//! use vstamp::version::{generate, VersionConfig};
//!
//! let config = VersionConfig::new(".").with_prefix("v");
//! let version = generate(&config)?;
//! println!("{}", version.formatted_version);
//! # Ok::<(), vstamp::version::VersionError>(())
//! ```

pub mod abbrev;
pub mod ambiguity;
pub mod artifact;
pub mod depth;
pub mod format;
pub mod generator;
pub mod graph;
pub mod head;
pub mod inspect;

pub use ambiguity::AmbiguityError;
pub use artifact::{default_output_path, write_artifact, ArtifactError};
pub use format::{Template, TemplateError};
pub use generator::generate;
pub use graph::CommitGraph;
pub use inspect::RepositoryState;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::types::{AbbrevLength, Oid};
use crate::git::GitError;

/// Errors from version generation.
///
/// Every variant is fatal: retrying without a change to the repository
/// cannot produce a different outcome.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("cannot open repository at '{path}'")]
    RepositoryOpen {
        path: PathBuf,
        #[source]
        source: GitError,
    },

    #[error("cannot resolve HEAD for repository '{path}'")]
    UnresolvableHead {
        path: PathBuf,
        #[source]
        source: GitError,
    },

    #[error("{}", describe_dirty(.path, .untracked, .modified))]
    DirtyRepository {
        path: PathBuf,
        untracked: BTreeSet<PathBuf>,
        modified: BTreeSet<PathBuf>,
    },

    #[error(transparent)]
    Ambiguous(#[from] AmbiguityError),

    #[error(transparent)]
    Git(#[from] GitError),
}

fn describe_dirty(path: &Path, untracked: &BTreeSet<PathBuf>, modified: &BTreeSet<PathBuf>) -> String {
    let list = |paths: &BTreeSet<PathBuf>| {
        paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut message = format!("repository '{}' has pending changes:", path.display());
    if !untracked.is_empty() {
        message.push_str(&format!("\n- untracked files: [{}]", list(untracked)));
    }
    if !modified.is_empty() {
        message.push_str(&format!("\n- uncommitted changes: [{}]", list(modified)));
    }
    message
}

/// Inputs for one version generation.
///
/// Built with [`VersionConfig::new`] and the `with_*` methods; defaults are
/// a 12 character hash, no prefix, the `{depth}.{hash}` template, a clean
/// working copy and no sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConfig {
    /// Any path inside the repository
    pub root: PathBuf,
    /// Hex characters kept from the HEAD hash
    pub abbrev_length: AbbrevLength,
    /// Text prepended to the rendered template
    pub version_prefix: String,
    /// Depth/hash template
    pub template: Template,
    /// Generate even with untracked or modified files
    pub allow_dirty: bool,
    /// Apply [`abbrev::sanitize`] to the displayed hash
    pub sanitize: bool,
}

impl VersionConfig {
    /// Configuration with defaults for the repository at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            abbrev_length: AbbrevLength::default(),
            version_prefix: String::new(),
            template: Template::default(),
            allow_dirty: false,
            sanitize: false,
        }
    }

    pub fn with_abbrev_length(mut self, abbrev_length: AbbrevLength) -> Self {
        self.abbrev_length = abbrev_length;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.version_prefix = prefix.into();
        self
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn with_allow_dirty(mut self, allow_dirty: bool) -> Self {
        self.allow_dirty = allow_dirty;
        self
    }

    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }
}

/// What is known about HEAD during one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadMeta {
    pub commit: Oid,
    /// Unsanitized abbreviation, the form compared for collisions
    pub abbreviated_hash: String,
    pub depth: u64,
}

/// The result of a generation.
///
/// Displays as the two-line artifact: the formatted version, then the full
/// commit hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedVersion {
    #[serde(rename = "version")]
    pub formatted_version: String,
    pub full_hash: String,
}

impl std::fmt::Display for GeneratedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.formatted_version, self.full_hash)
    }
}
