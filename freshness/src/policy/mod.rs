//! Policy resolution: pattern matching, validation and the resolving engine.

pub mod engine;
pub mod pattern;
pub mod types;
pub mod validate;

pub use engine::PolicyEngine;
pub use pattern::{matches, Pattern, Segment};
pub use types::{Defaults, Directive, ResolvedPolicy, Rule, UnknownDirective};
pub use validate::{validate_default, validate_rules};
