//! version::format
//!
//! Version templates.
//!
//! A template holds exactly one depth placeholder and one hash placeholder.
//! Two spellings are accepted:
//!
//! - named: `{depth}` and `{hash}`, in any order
//! - positional: two bare `{}`, the first receiving the depth and the
//!   second the hash
//!
//! `{{` and `}}` produce literal braces. Templates are parsed once, when
//! configuration is built, so a bad template fails before the repository is
//! touched.
//!
//! # Example
//!
//! ```
//! use vstamp::version::format::{format, Template};
//!
//! let template: Template = "{depth}-{hash}".parse().unwrap();
//! assert_eq!(format(&template, "v", 5, "abcdef12"), "v5-abcdef12");
//!
//! let positional: Template = "{}.{}".parse().unwrap();
//! assert_eq!(positional.render(3, "cafe"), "3.cafe");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = "{depth}.{hash}";

/// Errors from template parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{0}}}', expected {{depth}}, {{hash}} or {{}}")]
    UnknownPlaceholder(String),

    #[error("unclosed '{{' at offset {0}")]
    UnclosedBrace(usize),

    #[error("unmatched '}}' at offset {0}, use '}}}}' for a literal brace")]
    UnmatchedBrace(usize),

    #[error("more than two positional placeholders")]
    TooManyPositional,

    #[error("template has more than one {0} placeholder")]
    Duplicate(&'static str),

    #[error("template is missing the {0} placeholder")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Depth,
    Hash,
}

/// A parsed version template.
///
/// Keeps its source text for display and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse and validate a template.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] describing the first problem found.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut positional = 0usize;
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, n)| n) == Some('{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(TemplateError::UnclosedBrace(offset));
                    }

                    let segment = match name.trim() {
                        "depth" => Segment::Depth,
                        "hash" => Segment::Hash,
                        "" => {
                            positional += 1;
                            match positional {
                                1 => Segment::Depth,
                                2 => Segment::Hash,
                                _ => return Err(TemplateError::TooManyPositional),
                            }
                        }
                        _ => return Err(TemplateError::UnknownPlaceholder(name)),
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' if chars.peek().map(|&(_, n)| n) == Some('}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::UnmatchedBrace(offset)),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self::require_once(&segments, &Segment::Depth, "depth")?;
        Self::require_once(&segments, &Segment::Hash, "hash")?;

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    fn require_once(
        segments: &[Segment],
        wanted: &Segment,
        name: &'static str,
    ) -> Result<(), TemplateError> {
        match segments.iter().filter(|s| *s == wanted).count() {
            0 => Err(TemplateError::Missing(name)),
            1 => Ok(()),
            _ => Err(TemplateError::Duplicate(name)),
        }
    }

    /// Substitute `depth` and `hash` into the template.
    pub fn render(&self, depth: u64, hash: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + hash.len() + 20);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Depth => out.push_str(&depth.to_string()),
                Segment::Hash => out.push_str(hash),
            }
        }
        out
    }

    /// The template text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for Template {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: vec![
                Segment::Depth,
                Segment::Literal(".".to_string()),
                Segment::Hash,
            ],
        }
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Template {
    type Error = TemplateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.source
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Render a full version: `prefix` followed by the expanded template.
pub fn format(template: &Template, prefix: &str, depth: u64, hash: &str) -> String {
    let mut out = String::from(prefix);
    out.push_str(&template.render(depth, hash));
    out
}
