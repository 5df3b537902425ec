//! Static `[Cache-Control: ...]` annotation on tool descriptions.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use rmcp::model::Tool;

use crate::policy::ResolvedPolicy;

/// Trailing annotation in exactly the format [`decorate_tool`] emits.
static TRAILING_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" \[Cache-Control: (?:no-store|immutable)\]$")
        .expect("cache-control annotation regex is valid")
});

/// Append the policy's directive to the tool description.
///
/// Tools without a directive are returned borrowed and untouched. Any
/// previously appended annotation is replaced, so decoration is idempotent.
pub fn decorate_tool<'a>(tool: &'a Tool, policy: Option<&ResolvedPolicy>) -> Cow<'a, Tool> {
    let Some(directive) = policy.and_then(ResolvedPolicy::directive) else {
        return Cow::Borrowed(tool);
    };

    let current = tool.description.as_deref().unwrap_or("");
    let base = strip_directive(current);

    let mut decorated = tool.clone();
    decorated.description = Some(Cow::Owned(format!("{base} [Cache-Control: {directive}]")));
    Cow::Owned(decorated)
}

/// Remove a trailing cache-control annotation, if present.
pub fn strip_directive(description: &str) -> &str {
    match TRAILING_DIRECTIVE.find(description) {
        Some(m) => &description[..m.start()],
        None => description,
    }
}
