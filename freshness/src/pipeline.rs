//! Listing-time and call-time annotation pipeline.
//!
//! Listing: every tool goes through [`PolicyEngine::resolve`] and then
//! [`decorate_tool`]. Call: once the upstream call has produced a result, its
//! policy and failure flag go through [`resolve_invalidations`] and, when that
//! yields anything, [`decorate_result`].

use std::{borrow::Cow, sync::Arc};

use rmcp::model::{CallToolResult, Tool};
use tracing::debug;

use crate::{
    annotate::{decorate_result, decorate_tool, resolve_invalidations},
    metrics::FreshnessMetrics,
    policy::PolicyEngine,
};

pub struct FreshnessPipeline {
    engine: Arc<PolicyEngine>,
    metrics: FreshnessMetrics,
}

impl FreshnessPipeline {
    pub fn new(engine: Arc<PolicyEngine>) -> Self {
        Self {
            engine,
            metrics: FreshnessMetrics::new(),
        }
    }

    pub fn engine(&self) -> &Arc<PolicyEngine> {
        &self.engine
    }

    pub fn metrics(&self) -> &FreshnessMetrics {
        &self.metrics
    }

    pub fn decorate_tool<'a>(&self, tool: &'a Tool) -> Cow<'a, Tool> {
        let policy = self.engine.resolve(&tool.name);
        let decorated = decorate_tool(tool, policy.as_deref());
        self.metrics.record_tool_listed(matches!(decorated, Cow::Owned(_)));
        decorated
    }

    /// Decorate a listing, preserving order.
    pub fn decorate_tools(&self, tools: Vec<Tool>) -> Vec<Tool> {
        tools
            .into_iter()
            .map(|tool| {
                let decorated = match self.decorate_tool(&tool) {
                    Cow::Owned(decorated) => Some(decorated),
                    Cow::Borrowed(_) => None,
                };
                decorated.unwrap_or(tool)
            })
            .collect()
    }

    /// Attach an invalidation notice to the result of calling `name`.
    ///
    /// A result with `is_error == Some(true)` counts as a failed call and is
    /// returned untouched.
    pub fn annotate_result<'a>(
        &self,
        name: &str,
        result: &'a CallToolResult,
    ) -> Cow<'a, CallToolResult> {
        let failed = result.is_error == Some(true);
        self.metrics.record_call(failed);

        let policy = self.engine.resolve(name);
        let patterns = resolve_invalidations(policy.as_deref(), failed);
        if patterns.is_empty() {
            if failed && policy.as_ref().is_some_and(|p| p.invalidates().is_some()) {
                debug!(tool = name, "Suppressed invalidation for failed call");
                self.metrics.record_notice_suppressed();
            }
            return Cow::Borrowed(result);
        }

        debug!(tool = name, patterns = ?patterns, "Emitting invalidation notice");
        self.metrics.record_notice_emitted(name);
        Cow::Owned(decorate_result(result, patterns, name))
    }
}
