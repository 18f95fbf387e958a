//! vstamp - Deterministic build versions from Git history
//!
//! vstamp derives a version string from a repository's HEAD commit: the
//! number of commits in HEAD's history plus an abbreviated commit hash,
//! rendered through a template. The same commit always yields the same
//! version, and generation refuses to hand out a version that another
//! branch tip's history could also produce.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, merges config)
//! - [`version`] - Inspection, depth, abbreviation, collision checks, formatting
//! - [`core`] - Domain types and configuration
//! - [`git`] - Single interface for all Git operations
//! - [`ui`] - User-facing output
//!
//! # Guarantees
//!
//! 1. Repository access is read-only
//! 2. A version is only returned after every branch has been checked
//! 3. No output is written when generation fails

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
pub mod version;
