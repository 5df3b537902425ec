//! Listing-time and call-time annotations.
//!
//! - [`description`]: `[Cache-Control: <directive>]` suffix on tool descriptions
//! - [`invalidation`]: which patterns a completed call invalidates
//! - [`response`]: `[System: Cache invalidated for ...]` notice on call results

pub mod description;
pub mod invalidation;
pub mod response;

pub use description::{decorate_tool, strip_directive};
pub use invalidation::resolve_invalidations;
pub use response::{decorate_result, invalidation_notice};
