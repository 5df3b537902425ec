//! Policy data model: directives, rules, defaults and resolved policies.

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Static freshness directive advertised alongside a tool.
///
/// No time-based variant exists: the consumer has no clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Directive {
    /// Never reuse a previous result.
    NoStore,
    /// Reuse a previous result forever.
    Immutable,
}

impl Directive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Directive::NoStore => "no-store",
            Directive::Immutable => "immutable",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the two directive values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cache directive '{0}' (expected 'no-store' or 'immutable')")]
pub struct UnknownDirective(pub String);

impl FromStr for Directive {
    type Err = UnknownDirective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no-store" => Ok(Directive::NoStore),
            "immutable" => Ok(Directive::Immutable),
            other => Err(UnknownDirective(other.to_string())),
        }
    }
}

/// A declared rule. Order within a rule set is significant: first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub directive: Option<Directive>,
    pub invalidates: Vec<String>,
}

impl Rule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            directive: None,
            invalidates: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    #[must_use]
    pub fn with_invalidates<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invalidates = patterns.into_iter().map(Into::into).collect();
        self
    }
}

/// Fallback applied when no rule matches (and for matched rules without a directive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Defaults {
    pub directive: Option<Directive>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }
}

/// Effective policy for one tool name.
///
/// Instances are built once by the engine and shared behind an `Arc`; there is
/// no way to mutate one after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    directive: Option<Directive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalidates: Option<Arc<[String]>>,
}

impl ResolvedPolicy {
    /// Returns `None` when neither field carries anything ("no policy").
    pub(crate) fn build(
        directive: Option<Directive>,
        invalidates: Option<Arc<[String]>>,
    ) -> Option<Self> {
        if directive.is_none() && invalidates.is_none() {
            return None;
        }
        Some(Self {
            directive,
            invalidates,
        })
    }

    pub fn directive(&self) -> Option<Directive> {
        self.directive
    }

    pub fn invalidates(&self) -> Option<&[String]> {
        self.invalidates.as_deref()
    }
}
