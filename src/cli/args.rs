//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vstamp - Deterministic build versions from Git history
#[derive(Parser, Debug)]
#[command(name = "vstamp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if vstamp was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the version of the current repository state
    #[command(
        name = "generate",
        long_about = "Compute a version from the repository's HEAD commit.\n\n\
            The version is the number of commits in HEAD's history followed by an \
            abbreviated commit hash, rendered through a template. Every local and \
            remote-tracking branch is scanned first: if another commit would render \
            the same version, generation fails and asks for a longer abbreviation.\n\n\
            Output is two lines: the version, then the full commit hash.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Print the version for the current repository
    vstamp generate

    # Tag-like output with a prefix and custom template
    vstamp generate --prefix v --template '{depth}-{hash}'

    # Write build/generated/version/version.txt for the packaging step
    vstamp generate --write

    # Machine-readable output
    vstamp generate --json

TEMPLATES:
    {depth} and {hash} may appear in any order; two bare {} placeholders
    receive the depth and the hash, in that order. Use {{ and }} for
    literal braces."
    )]
    Generate(GenerateArgs),

    /// Get, set, or list version defaults
    #[command(
        name = "config",
        after_help = "\
KEYS:
    abbrev_length   Hex characters kept from the hash (default 12, minimum 2)
    prefix          Text prepended to every version (default empty)
    template        Depth/hash template (default {depth}.{hash})
    allow_dirty     Tolerate untracked or modified files (default false)
    sanitize        Append _ after every a and b in the hash (default false)

WORKFLOW EXAMPLES:
    vstamp config set abbrev_length 10
    vstamp config set --global prefix v
    vstamp config list"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    vstamp completion bash > ~/.local/share/bash-completion/completions/vstamp

    # Zsh
    vstamp completion zsh > ~/.zfunc/_vstamp

    # Fish
    vstamp completion fish > ~/.config/fish/completions/vstamp.fish

    # PowerShell
    vstamp completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `vstamp generate`.
///
/// Flags override configured defaults. Boolean flags can only switch a
/// behavior on.
#[derive(clap::Args, Debug, Default)]
pub struct GenerateArgs {
    /// Repository to version (defaults to the working directory)
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Hex characters kept from the commit hash
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(2..))]
    pub abbrev_length: Option<u32>,

    /// Text prepended to the version
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Version template
    #[arg(long, value_name = "TEMPLATE", env = "VSTAMP_FORMAT")]
    pub template: Option<String>,

    /// Generate even if the working copy has pending changes
    #[arg(long)]
    pub allow_dirty: bool,

    /// Append an underscore after every 'a' and 'b' in the hash
    #[arg(
        long,
        env = "VSTAMP_SANITIZE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub sanitize: bool,

    /// Write the version file to this path instead of stdout
    #[arg(long, value_name = "FILE", env = "VSTAMP_FILE", conflicts_with = "write")]
    pub output: Option<PathBuf>,

    /// Write the version file to build/generated/version/version.txt
    #[arg(long)]
    pub write: bool,

    /// Print JSON instead of the two-line format
    #[arg(long)]
    pub json: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get the effective value of a key
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Write to the global config instead of the repository
        #[arg(long)]
        global: bool,
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all effective configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["vstamp", "generate"]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert!(args.root.is_none());
                assert!(args.abbrev_length.is_none());
                assert!(!args.allow_dirty);
                assert!(!args.write);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn abbrev_length_below_two_rejected() {
        let result = Cli::try_parse_from(["vstamp", "generate", "--abbrev-length", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn output_conflicts_with_write() {
        let result =
            Cli::try_parse_from(["vstamp", "generate", "--output", "v.txt", "--write"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vstamp", "generate", "--debug", "-q"]).unwrap();
        assert!(cli.debug);
        assert!(cli.quiet);
    }

    #[test]
    fn config_set_global() {
        let cli =
            Cli::try_parse_from(["vstamp", "config", "set", "--global", "prefix", "v"]).unwrap();
        match cli.command {
            Command::Config {
                action: ConfigAction::Set { global, key, value },
            } => {
                assert!(global);
                assert_eq!(key, "prefix");
                assert_eq!(value, "v");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
