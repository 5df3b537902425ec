//! Cache-control and invalidation annotations for MCP tools.
//!
//! Tool-calling models cannot observe upstream state changes and have no
//! notion of elapsed time. This crate adds two machine-readable hints:
//!
//! - a static `[Cache-Control: no-store|immutable]` suffix on each listed
//!   tool's description
//! - a `[System: Cache invalidated for ... — caused by ...]` notice prepended
//!   to the result of a successful mutating call
//!
//! ## Modules
//!
//! - [`policy`]: pattern matching, rule validation and the resolving engine
//! - [`annotate`]: description, invalidation and result decoration
//! - [`pipeline`]: listing/call glue around a [`PolicyEngine`]
//! - [`provider`]: uniform upstream interface and the annotating wrapper
//! - [`config`]: YAML/JSON rule configuration

pub mod annotate;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod policy;
pub mod provider;

pub use annotate::{decorate_result, decorate_tool, invalidation_notice, resolve_invalidations};
pub use config::{DefaultConfig, FreshnessConfig, RuleConfig};
pub use error::{ConfigError, FreshnessError, FreshnessResult};
pub use metrics::{FreshnessMetrics, FreshnessMetricsSnapshot};
pub use pipeline::FreshnessPipeline;
pub use policy::{matches, Defaults, Directive, Pattern, PolicyEngine, ResolvedPolicy, Rule};
pub use provider::{FreshnessProvider, ToolProvider};
// Protocol types the annotations operate on
pub use rmcp::model::{CallToolResult, Content, Tool};
