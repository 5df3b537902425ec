//! Invalidation set for a completed call.

use crate::policy::ResolvedPolicy;

/// Patterns to invalidate after a call to a tool with `policy`.
///
/// A failed call never invalidates anything: the state it would have changed
/// was not changed.
pub fn resolve_invalidations(policy: Option<&ResolvedPolicy>, failed: bool) -> &[String] {
    if failed {
        return &[];
    }
    policy.and_then(ResolvedPolicy::invalidates).unwrap_or(&[])
}
