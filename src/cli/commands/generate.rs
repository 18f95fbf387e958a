//! generate command - Compute and emit the version for HEAD

use anyhow::{Context as _, Result};

use crate::cli::args::GenerateArgs;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::types::AbbrevLength;
use crate::git::Git;
use crate::ui::output;
use crate::version::{self, default_output_path, write_artifact, Template, VersionConfig};

/// Generate a version and print or write it.
pub fn generate(ctx: &Context, args: &GenerateArgs) -> Result<()> {
    let verbosity = ctx.verbosity();
    let cwd = ctx.working_dir()?;
    let root = match &args.root {
        Some(root) => cwd.join(root),
        None => cwd,
    };

    // Config lookup is best effort; an unopenable repository is reported by
    // the generator itself.
    let info = Git::open(&root).ok().and_then(|git| git.info().ok());
    let loaded = Config::load(info.as_ref()).context("Failed to load config")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }

    let config = apply_overrides(loaded.config.version_config(&root), args)?;
    let version = version::generate(&config)?;

    let work_dir = info.map(|i| i.work_dir).unwrap_or_else(|| root.clone());
    let target = match (&args.output, args.write) {
        (Some(path), _) => Some(root.join(path)),
        (None, true) => Some(default_output_path(&work_dir)),
        (None, false) => None,
    };

    if let Some(path) = target {
        write_artifact(&path, &version)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&version)?);
        } else {
            output::success(
                format!("Wrote {} to {}", version.formatted_version, path.display()),
                verbosity,
            );
        }
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&version)?);
    } else {
        println!("{}", version);
    }

    Ok(())
}

/// Layer command-line flags over configured defaults.
fn apply_overrides(mut config: VersionConfig, args: &GenerateArgs) -> Result<VersionConfig> {
    if let Some(len) = args.abbrev_length {
        config.abbrev_length = AbbrevLength::new(len)?;
    }
    if let Some(prefix) = &args.prefix {
        config.version_prefix = prefix.clone();
    }
    if let Some(template) = &args.template {
        config.template = Template::parse(template)
            .with_context(|| format!("Invalid template '{}'", template))?;
    }
    config.allow_dirty |= args.allow_dirty;
    config.sanitize |= args.sanitize;
    Ok(config)
}
