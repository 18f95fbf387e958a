//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Oid`] - Git object identifier (SHA)
//! - [`AbbrevLength`] - Validated abbreviation length for version hashes
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so a pathological configuration never reaches
//! the history walk.
//!
//! # Examples
//!
//! ```
//! use vstamp::core::types::{AbbrevLength, Oid};
//!
//! let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! let len = AbbrevLength::new(8).unwrap();
//! assert_eq!(oid.short(len.get()), "abc123de");
//!
//! assert!(Oid::new("not-a-sha").is_err());
//! assert!(AbbrevLength::new(1).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("invalid abbreviation length: {0}")]
    InvalidAbbrevLength(String),
}

/// A Git object identifier (SHA-1 or SHA-256).
///
/// OIDs are normalized to lowercase for consistency, so two ids naming the
/// same commit always compare equal and abbreviate identically.
///
/// # Example
///
/// ```
/// use vstamp::core::types::Oid;
///
/// // Create from hex string (normalized to lowercase)
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
///
/// // Get abbreviated form
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// The OID is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a valid hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Get an abbreviated form of the OID.
    ///
    /// Returns the first `len` characters. If `len` exceeds the OID length,
    /// returns the full OID.
    ///
    /// # Example
    ///
    /// ```
    /// use vstamp::core::types::Oid;
    ///
    /// let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
    /// assert_eq!(oid.short(7), "abc123d");
    /// assert_eq!(oid.short(4), "abc1");
    /// assert_eq!(oid.short(100).len(), 40);
    /// ```
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Validate an object id.
    fn validate(oid: &str) -> Result<(), TypeError> {
        // SHA-1 is 40 hex chars, SHA-256 is 64
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of hex characters kept from a commit hash in a version string.
///
/// Lengths below [`AbbrevLength::MIN`] are rejected: with one hex digit there
/// are only sixteen possible abbreviations and collisions become the norm.
///
/// # Example
///
/// ```
/// use vstamp::core::types::AbbrevLength;
///
/// assert_eq!(AbbrevLength::default().get(), 12);
/// assert_eq!(AbbrevLength::new(2).unwrap().get(), 2);
/// assert!(AbbrevLength::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AbbrevLength(u32);

impl AbbrevLength {
    /// Smallest accepted length.
    pub const MIN: u32 = 2;

    /// Length used when nothing is configured.
    pub const DEFAULT: u32 = 12;

    /// Create a validated abbreviation length.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidAbbrevLength` if `len` is below [`Self::MIN`].
    pub fn new(len: u32) -> Result<Self, TypeError> {
        if len < Self::MIN {
            return Err(TypeError::InvalidAbbrevLength(format!(
                "must be at least {}, got {}",
                Self::MIN,
                len
            )));
        }
        Ok(Self(len))
    }

    /// The length as a `usize`, ready for slicing.
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for AbbrevLength {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u32> for AbbrevLength {
    type Error = TypeError;

    fn try_from(len: u32) -> Result<Self, Self::Error> {
        Self::new(len)
    }
}

impl From<AbbrevLength> for u32 {
    fn from(len: AbbrevLength) -> Self {
        len.0
    }
}

impl std::fmt::Display for AbbrevLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
