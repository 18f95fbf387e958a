//! config command - Get, set, or list configuration values

use crate::cli::Context;
use crate::core::config::{Config, VersionDefaults};
use crate::git::{Git, RepoInfo};
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// Keys accepted by `config get` and `config set`.
const KEYS: [&str; 5] = ["abbrev_length", "prefix", "template", "allow_dirty", "sanitize"];

fn repo_info(ctx: &Context) -> Result<Option<RepoInfo>> {
    let cwd = ctx.working_dir()?;
    Ok(Git::open(&cwd).ok().and_then(|git| git.info().ok()))
}

fn load(ctx: &Context, info: Option<&RepoInfo>) -> Result<Config> {
    let loaded = Config::load(info).context("Failed to load config")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }
    Ok(loaded.config)
}

/// Effective value of `key`, after defaults are applied.
fn effective(config: &Config, key: &str) -> Result<String> {
    let value = match key {
        "abbrev_length" => config.abbrev_length().to_string(),
        "prefix" => config.prefix(),
        "template" => config.template().to_string(),
        "allow_dirty" => config.allow_dirty().to_string(),
        "sanitize" => config.sanitize().to_string(),
        _ => bail!("Unknown configuration key: {}", key),
    };
    Ok(value)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => bail!("Invalid value for {}: expected true or false", key),
    }
}

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let info = repo_info(ctx)?;
    let config = load(ctx, info.as_ref())?;
    println!("{}", effective(&config, key)?);
    Ok(())
}

/// Set a configuration value.
///
/// Writes the repository file unless `global` is set.
pub fn set(ctx: &Context, global: bool, key: &str, value: &str) -> Result<()> {
    let info = repo_info(ctx)?;
    let config = load(ctx, info.as_ref())?;

    let mut defaults = if global {
        config.global.clone()
    } else {
        config.repo.clone().unwrap_or_default()
    };

    match key {
        "abbrev_length" => {
            let len = value
                .parse::<u32>()
                .with_context(|| format!("Invalid value for {}: '{}'", key, value))?;
            defaults.abbrev_length = Some(len);
        }
        "prefix" => defaults.prefix = Some(value.to_string()),
        "template" => defaults.template = Some(value.to_string()),
        "allow_dirty" => defaults.allow_dirty = Some(parse_bool(key, value)?),
        "sanitize" => defaults.sanitize = Some(parse_bool(key, value)?),
        _ => bail!(
            "Unknown configuration key: {} (expected one of: {})",
            key,
            KEYS.join(", ")
        ),
    }

    defaults.validate()?;
    let path = write(global, info.as_ref(), &defaults)?;

    output::success(
        format!("Set {} = {} in {}", key, value, path.display()),
        ctx.verbosity(),
    );
    Ok(())
}

fn write(
    global: bool,
    info: Option<&RepoInfo>,
    defaults: &VersionDefaults,
) -> Result<std::path::PathBuf> {
    if global {
        return Config::write_global(defaults).context("Failed to write global config");
    }
    let Some(info) = info else {
        bail!("Not inside a Git repository; use --global to set a user default");
    };
    Config::write_repo(&info.git_dir, defaults).context("Failed to write repository config")
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let info = repo_info(ctx)?;
    let config = load(ctx, info.as_ref())?;

    if !ctx.quiet {
        let describe = |path: Option<&std::path::Path>| {
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        };
        println!("# global: {}", describe(config.global_config_loaded_from()));
        println!("# repo: {}", describe(config.repo_config_loaded_from()));
    }

    for key in KEYS {
        println!("{} = {}", key, effective(&config, key)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_defaults() {
        let config = Config::default();
        assert_eq!(effective(&config, "abbrev_length").unwrap(), "12");
        assert_eq!(effective(&config, "template").unwrap(), "{depth}.{hash}");
        assert_eq!(effective(&config, "prefix").unwrap(), "");
        assert_eq!(effective(&config, "sanitize").unwrap(), "false");
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(effective(&Config::default(), "trunk").is_err());
    }

    #[test]
    fn parse_bool_accepts_common_forms() {
        assert!(parse_bool("sanitize", "yes").unwrap());
        assert!(!parse_bool("sanitize", "0").unwrap());
        assert!(parse_bool("sanitize", "maybe").is_err());
    }
}
