//! Dynamic invalidation notice on tool results.

use rmcp::model::{CallToolResult, Content};

/// Text of the notice block for `patterns` caused by the tool `cause`.
pub fn invalidation_notice(patterns: &[String], cause: &str) -> String {
    format!(
        "[System: Cache invalidated for {} — caused by {}]",
        patterns.join(", "),
        cause
    )
}

/// Return a copy of `result` with the invalidation notice as its first block.
///
/// Callers only invoke this with a non-empty `patterns`. The original content
/// blocks follow the notice in their original order; every other field of the
/// result is carried over unchanged.
pub fn decorate_result(
    result: &CallToolResult,
    patterns: &[String],
    cause: &str,
) -> CallToolResult {
    let mut content = Vec::with_capacity(result.content.len() + 1);
    content.push(Content::text(invalidation_notice(patterns, cause)));
    content.extend(result.content.iter().cloned());

    let mut decorated = result.clone();
    decorated.content = content;
    decorated
}
