//! version::abbrev
//!
//! Hash abbreviation and the `a`/`b` sanitizing transform.
//!
//! The abbreviation is the literal hex prefix of the commit id. It is not
//! extended when the prefix is ambiguous in the object database; collisions
//! that matter for versions are caught by [`crate::version::ambiguity`].

use crate::core::types::{AbbrevLength, Oid};

/// The first `length` hex characters of `id`.
///
/// # Example
///
/// ```
/// use vstamp::core::types::{AbbrevLength, Oid};
/// use vstamp::version::abbrev::abbreviate;
///
/// let oid = Oid::new("abcdef1234567890abcdef1234567890abcdef12").unwrap();
/// assert_eq!(abbreviate(&oid, AbbrevLength::new(8).unwrap()), "abcdef12");
/// ```
pub fn abbreviate(id: &Oid, length: AbbrevLength) -> String {
    id.short(length.get()).to_string()
}

/// Append `_` after every `a` and `b` in `hash`.
///
/// Some version-qualifier parsers downstream misread those two letters, so
/// this transform is exactly that and nothing more: other characters are
/// left alone.
///
/// # Example
///
/// ```
/// use vstamp::version::abbrev::sanitize;
///
/// assert_eq!(sanitize("ab12cd"), "a_b_12cd");
/// assert_eq!(sanitize("00ff"), "00ff");
/// ```
pub fn sanitize(hash: &str) -> String {
    let mut out = String::with_capacity(hash.len() * 2);
    for c in hash.chars() {
        out.push(c);
        if c == 'a' || c == 'b' {
            out.push('_');
        }
    }
    out
}
