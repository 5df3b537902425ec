//! Policy engine: first-match-wins resolution with a per-engine memo cache.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};

use super::{
    pattern::Pattern,
    types::{Defaults, Directive, ResolvedPolicy, Rule},
    validate::{check_invalidations, check_pattern, validate_default, validate_rules},
};
use crate::{config::FreshnessConfig, error::ConfigError};

#[derive(Debug)]
struct CompiledRule {
    pattern: Pattern,
    directive: Option<Directive>,
    invalidates: Option<Arc<[String]>>,
}

/// Resolves tool names to [`ResolvedPolicy`] values.
///
/// Construction validates every rule; an engine never exists with an invalid
/// rule set. Rules are immutable afterwards. The cache only grows: each name is
/// resolved once and the outcome (including "no policy") is kept for the
/// lifetime of the engine.
#[derive(Debug)]
pub struct PolicyEngine {
    rules: Vec<CompiledRule>,
    defaults: Defaults,
    cache: DashMap<String, Option<Arc<ResolvedPolicy>>>,
}

impl PolicyEngine {
    pub fn new(rules: Vec<Rule>, defaults: Defaults) -> Result<Self, ConfigError> {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| {
                let pattern = check_pattern(index, &rule.pattern)?;
                check_invalidations(index, &rule.pattern, &rule.invalidates)?;
                Ok(CompiledRule {
                    pattern,
                    directive: rule.directive,
                    invalidates: (!rule.invalidates.is_empty())
                        .then(|| Arc::from(rule.invalidates)),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        info!(
            rules = rules.len(),
            default_directive = ?defaults.directive,
            "Built freshness policy engine"
        );

        Ok(Self {
            rules,
            defaults,
            cache: DashMap::new(),
        })
    }

    /// Validate a raw configuration and build an engine from it.
    pub fn from_config(config: &FreshnessConfig) -> Result<Self, ConfigError> {
        let rules = validate_rules(&config.rules)?;
        let defaults = validate_default(&config.defaults)?;
        Self::new(rules, defaults)
    }

    /// Resolve the effective policy for `name`.
    ///
    /// Repeated calls for the same name return the same `Arc`.
    pub fn resolve(&self, name: &str) -> Option<Arc<ResolvedPolicy>> {
        if let Some(cached) = self.cache.get(name) {
            return cached.value().clone();
        }

        let resolved = self.compute(name).map(Arc::new);
        debug!(
            tool = name,
            directive = ?resolved.as_ref().and_then(|p| p.directive()),
            invalidates = ?resolved.as_ref().and_then(|p| p.invalidates()),
            "Resolved freshness policy"
        );

        // A concurrent resolver may have won the race; keep whichever landed
        // first so every caller sees the same Arc.
        self.cache
            .entry(name.to_string())
            .or_insert(resolved)
            .value()
            .clone()
    }

    fn compute(&self, name: &str) -> Option<ResolvedPolicy> {
        match self.rules.iter().find(|rule| rule.pattern.matches(name)) {
            Some(rule) => ResolvedPolicy::build(
                rule.directive.or(self.defaults.directive),
                rule.invalidates.clone(),
            ),
            None => ResolvedPolicy::build(self.defaults.directive, None),
        }
    }

    pub fn defaults(&self) -> Defaults {
        self.defaults
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Number of names resolved so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
