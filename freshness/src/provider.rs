//! Uniform upstream tool provider and the freshness-annotating wrapper.
//!
//! Whatever server or client convention the upstream uses is adapted to
//! [`ToolProvider`] once, at the boundary. [`FreshnessProvider`] then applies
//! the [`FreshnessPipeline`] to listings and call results without knowing
//! anything about the upstream shape.

use std::{borrow::Cow, sync::Arc};

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};

use crate::{error::FreshnessResult, pipeline::FreshnessPipeline};

#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Opaque per-call context forwarded untouched to the upstream.
    type Context: Send + Sync;

    async fn list_tools(&self) -> FreshnessResult<Vec<Tool>>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
        ctx: &Self::Context,
    ) -> FreshnessResult<CallToolResult>;
}

/// Wraps a provider and annotates what it returns.
pub struct FreshnessProvider<P> {
    inner: P,
    pipeline: Arc<FreshnessPipeline>,
}

impl<P: ToolProvider> FreshnessProvider<P> {
    pub fn new(inner: P, pipeline: Arc<FreshnessPipeline>) -> Self {
        Self { inner, pipeline }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn pipeline(&self) -> &Arc<FreshnessPipeline> {
        &self.pipeline
    }
}

#[async_trait]
impl<P: ToolProvider> ToolProvider for FreshnessProvider<P> {
    type Context = P::Context;

    async fn list_tools(&self) -> FreshnessResult<Vec<Tool>> {
        let tools = self.inner.list_tools().await?;
        Ok(self.pipeline.decorate_tools(tools))
    }

    /// Errors from the upstream are returned as-is and never invalidate.
    async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
        ctx: &Self::Context,
    ) -> FreshnessResult<CallToolResult> {
        let result = self.inner.call_tool(name, arguments, ctx).await?;
        let annotated = match self.pipeline.annotate_result(name, &result) {
            Cow::Owned(annotated) => Some(annotated),
            Cow::Borrowed(_) => None,
        };
        Ok(annotated.unwrap_or(result))
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::Content;
    use serde_json::json;
    use tokio::sync::Mutex;

    use super::*;
    use crate::{
        error::FreshnessError,
        policy::{Defaults, Directive, PolicyEngine, Rule},
    };

    struct RecordingProvider {
        calls: Mutex<Vec<(String, Option<JsonObject>, u32)>>,
    }

    #[async_trait]
    impl ToolProvider for RecordingProvider {
        type Context = u32;

        async fn list_tools(&self) -> FreshnessResult<Vec<Tool>> {
            Ok(Vec::new())
        }

        async fn call_tool(
            &self,
            name: &str,
            arguments: Option<JsonObject>,
            ctx: &u32,
        ) -> FreshnessResult<CallToolResult> {
            self.calls
                .lock()
                .await
                .push((name.to_string(), arguments, *ctx));
            match name {
                "boards.delete" => Err(FreshnessError::ToolExecution("upstream down".into())),
                _ => Ok(CallToolResult::success(vec![Content::text("ok")])),
            }
        }
    }

    fn provider() -> FreshnessProvider<RecordingProvider> {
        let engine = PolicyEngine::new(
            vec![Rule::new("boards.*").with_invalidates(["boards.*"])],
            Defaults::new().with_directive(Directive::NoStore),
        )
        .unwrap();
        FreshnessProvider::new(
            RecordingProvider {
                calls: Mutex::new(Vec::new()),
            },
            Arc::new(FreshnessPipeline::new(Arc::new(engine))),
        )
    }

    #[tokio::test]
    async fn test_arguments_and_context_forwarded() {
        let provider = provider();
        let args = json!({"id": 7}).as_object().cloned();

        provider
            .call_tool("boards.archive", args.clone(), &42)
            .await
            .unwrap();

        let calls = provider.inner().calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("boards.archive".to_string(), args, 42));
    }

    #[tokio::test]
    async fn test_upstream_error_passes_through_without_notice() {
        let provider = provider();

        let err = provider.call_tool("boards.delete", None, &0).await.unwrap_err();
        assert!(matches!(err, FreshnessError::ToolExecution(_)));

        let snapshot = provider.pipeline().metrics().snapshot();
        assert_eq!(snapshot.notices_emitted, 0);
        assert_eq!(snapshot.calls_observed, 0);
    }
}
