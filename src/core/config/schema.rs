//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same keys are accepted at global and repository scope; a repository
//! file overrides the global one key by key.
//!
//! # Validation
//!
//! Config values are validated after parsing: the abbreviation length must
//! be at least 2 and the template must parse.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::AbbrevLength;
use crate::version::Template;

/// Version defaults, as stored in a config file.
///
/// # Example
///
/// ```toml
/// abbrev_length = 10
/// prefix = "v"
/// template = "{depth}-{hash}"
/// allow_dirty = false
/// sanitize = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct VersionDefaults {
    /// Hex characters kept from the commit hash
    pub abbrev_length: Option<u32>,

    /// Text prepended to every version
    pub prefix: Option<String>,

    /// Depth/hash template
    pub template: Option<String>,

    /// Whether a dirty working copy is tolerated
    pub allow_dirty: Option<bool>,

    /// Whether `a`/`b` in the hash get an underscore appended
    pub sanitize: Option<bool>,
}

impl VersionDefaults {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(len) = self.abbrev_length {
            AbbrevLength::new(len)
                .map_err(|e| ConfigError::InvalidValue(format!("abbrev_length: {}", e)))?;
        }

        if let Some(template) = &self.template {
            Template::parse(template)
                .map_err(|e| ConfigError::InvalidValue(format!("template: {}", e)))?;
        }

        Ok(())
    }

    /// Fill unset keys from `fallback`.
    pub fn or(self, fallback: &VersionDefaults) -> VersionDefaults {
        VersionDefaults {
            abbrev_length: self.abbrev_length.or(fallback.abbrev_length),
            prefix: self.prefix.or_else(|| fallback.prefix.clone()),
            template: self.template.or_else(|| fallback.template.clone()),
            allow_dirty: self.allow_dirty.or(fallback.allow_dirty),
            sanitize: self.sanitize.or(fallback.sanitize),
        }
    }
}
