//! Dot-segmented tool name patterns.
//!
//! A pattern is a sequence of `.`-separated segments. Each segment is either a
//! literal (`[A-Za-z0-9_-]+`), `*` (exactly one name segment) or `**` (zero or
//! more whole name segments).

use std::fmt;

/// One parsed pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// `*`
    Single,
    /// `**`
    Any,
}

impl Segment {
    /// Parse a single segment, rejecting anything outside the segment grammar.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "*" => Some(Segment::Single),
            "**" => Some(Segment::Any),
            _ if is_literal(raw) => Some(Segment::Literal(raw.to_string())),
            _ => None,
        }
    }
}

fn is_literal(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// A pattern compiled once at engine construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a pattern. On failure returns the first offending segment.
    pub fn parse(source: &str) -> Result<Self, String> {
        let segments = source
            .split('.')
            .map(|raw| Segment::parse(raw).ok_or_else(|| raw.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn matches(&self, name: &str) -> bool {
        let name: Vec<&str> = name.split('.').collect();
        match_segments(&self.segments, &name)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Match a raw pattern string against a tool name.
///
/// Segments are compared by value; an unparsable pattern segment can only
/// match an identical name segment.
pub fn matches(pattern: &str, name: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('.').collect();
    let name: Vec<&str> = name.split('.').collect();
    match_raw(&pattern, &name)
}

fn match_segments(pattern: &[Segment], name: &[&str]) -> bool {
    match (pattern.split_first(), name.split_first()) {
        (None, None) => true,
        (None, Some(_)) => false,
        (Some(_), None) => pattern.iter().all(|s| *s == Segment::Any),
        (Some((Segment::Any, rest)), Some((_, name_rest))) => {
            match_segments(rest, name) || match_segments(pattern, name_rest)
        }
        (Some((Segment::Single, rest)), Some((_, name_rest))) => match_segments(rest, name_rest),
        (Some((Segment::Literal(lit), rest)), Some((head, name_rest))) => {
            lit == head && match_segments(rest, name_rest)
        }
    }
}

fn match_raw(pattern: &[&str], name: &[&str]) -> bool {
    match (pattern.split_first(), name.split_first()) {
        (None, None) => true,
        (None, Some(_)) => false,
        (Some(_), None) => pattern.iter().all(|s| *s == "**"),
        (Some((&"**", rest)), Some((_, name_rest))) => {
            match_raw(rest, name) || match_raw(pattern, name_rest)
        }
        (Some((&"*", rest)), Some((_, name_rest))) => match_raw(rest, name_rest),
        (Some((lit, rest)), Some((head, name_rest))) => lit == head && match_raw(rest, name_rest),
    }
}
