//! version::artifact
//!
//! The version file consumed later in a build pipeline: the formatted
//! version on the first line, the full commit hash on the second.
//!
//! Writes are atomic (write to a uniquely named temp file in the target
//! directory, then rename) so a reader never sees a half-written file, and
//! the file is only written after a successful generation. A failed write
//! removes its temp file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use super::GeneratedVersion;

/// Output location, relative to the repository root, when none is given.
pub const DEFAULT_OUTPUT: &str = "build/generated/version/version.txt";

/// Errors from writing the version file.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to write version file '{path}'")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The default version file location for a repository rooted at `root`.
pub fn default_output_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_OUTPUT)
}

fn write_err(path: &Path) -> impl FnOnce(std::io::Error) -> ArtifactError {
    let path = path.to_path_buf();
    move |source| ArtifactError::WriteError { path, source }
}

/// Write `version` to `path`, creating parent directories as needed.
pub fn write_artifact(path: &Path, version: &GeneratedVersion) -> Result<(), ArtifactError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err(path))?;

    // Same directory as the target so the rename stays on one filesystem.
    // Dropping the handle on an early return deletes the temp file.
    let mut file = NamedTempFile::new_in(dir).map_err(write_err(path))?;
    file.write_all(version.to_string().as_bytes())
        .map_err(write_err(path))?;
    file.as_file().sync_all().map_err(write_err(path))?;

    file.persist(path).map_err(|e| write_err(path)(e.error))?;

    Ok(())
}
