//! Eager, fail-fast validation of rule sets and defaults.
//!
//! Each rule is checked in declaration order, and within a rule in this order:
//! 1. `pattern` is non-empty
//! 2. every segment of `pattern` fits the segment grammar
//! 3. `directive`, if present, is `no-store` or `immutable`
//! 4. `invalidates`, if present, is an array of non-empty strings
//!
//! The first violation aborts validation.

use serde_json::Value;

use super::{
    pattern::Pattern,
    types::{Defaults, Directive, Rule},
};
use crate::{
    config::{DefaultConfig, RuleConfig},
    error::ConfigError,
};

/// Validate raw rule configs and convert them into typed [`Rule`]s.
pub fn validate_rules(rules: &[RuleConfig]) -> Result<Vec<Rule>, ConfigError> {
    rules
        .iter()
        .enumerate()
        .map(|(index, rule)| validate_rule_config(index, rule))
        .collect()
}

/// Validate the raw default config.
pub fn validate_default(default: &DefaultConfig) -> Result<Defaults, ConfigError> {
    let directive = match default.directive.as_deref() {
        None => None,
        Some(value) => Some(value.parse::<Directive>().map_err(|_| {
            ConfigError::InvalidDefaultDirective {
                value: value.to_string(),
            }
        })?),
    };
    Ok(Defaults { directive })
}

fn validate_rule_config(index: usize, rule: &RuleConfig) -> Result<Rule, ConfigError> {
    let pattern = &rule.pattern;
    check_pattern(index, pattern)?;

    let directive = match rule.directive.as_deref() {
        None => None,
        Some(value) => Some(value.parse::<Directive>().map_err(|_| {
            ConfigError::InvalidDirective {
                index,
                pattern: pattern.clone(),
                value: value.to_string(),
            }
        })?),
    };

    let invalidates = match &rule.invalidates {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(position, item)| match item {
                Value::String(s) if s.is_empty() => Err(ConfigError::EmptyInvalidation {
                    index,
                    pattern: pattern.clone(),
                    position,
                }),
                Value::String(s) => Ok(s.clone()),
                _ => Err(ConfigError::InvalidationNotString {
                    index,
                    pattern: pattern.clone(),
                    position,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(ConfigError::InvalidationsNotArray {
                index,
                pattern: pattern.clone(),
                found: json_kind(other).to_string(),
            })
        }
    };

    Ok(Rule {
        pattern: pattern.clone(),
        directive,
        invalidates,
    })
}

/// Check the pattern of the rule at `index`, returning it compiled.
pub(crate) fn check_pattern(index: usize, pattern: &str) -> Result<Pattern, ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::EmptyPattern { index });
    }
    Pattern::parse(pattern).map_err(|segment| ConfigError::InvalidSegment {
        index,
        pattern: pattern.to_string(),
        segment,
    })
}

/// Invalidation entries are only required to be non-empty; they are matched
/// against tool names by the consumer, not compiled here.
pub(crate) fn check_invalidations(
    index: usize,
    pattern: &str,
    invalidates: &[String],
) -> Result<(), ConfigError> {
    match invalidates.iter().position(|p| p.is_empty()) {
        Some(position) => Err(ConfigError::EmptyInvalidation {
            index,
            pattern: pattern.to_string(),
            position,
        }),
        None => Ok(()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rule(pattern: &str) -> RuleConfig {
        RuleConfig {
            pattern: pattern.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_rules_convert_in_order() {
        let rules = vec![
            RuleConfig {
                directive: Some("immutable".to_string()),
                ..rule("a.b")
            },
            RuleConfig {
                directive: Some("no-store".to_string()),
                invalidates: Some(json!(["a.*", "b.**"])),
                ..rule("a.*")
            },
        ];

        let typed = validate_rules(&rules).unwrap();
        assert_eq!(typed.len(), 2);
        assert_eq!(typed[0].pattern, "a.b");
        assert_eq!(typed[0].directive, Some(Directive::Immutable));
        assert!(typed[0].invalidates.is_empty());
        assert_eq!(typed[1].directive, Some(Directive::NoStore));
        assert_eq!(typed[1].invalidates, vec!["a.*", "b.**"]);
    }

    #[test]
    fn test_empty_pattern() {
        let err = validate_rules(&[rule("ok"), rule("")]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyPattern { index: 1 });
    }

    #[test]
    fn test_invalid_segment() {
        let err = validate_rules(&[rule("sprints.up date")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidSegment {
                index: 0,
                pattern: "sprints.up date".to_string(),
                segment: "up date".to_string(),
            }
        );
        assert!(matches!(
            validate_rules(&[rule("a.")]).unwrap_err(),
            ConfigError::InvalidSegment { .. }
        ));
    }

    #[test]
    fn test_invalid_directive() {
        let err = validate_rules(&[RuleConfig {
            directive: Some("max-age=60".to_string()),
            ..rule("a.b")
        }])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDirective {
                index: 0,
                pattern: "a.b".to_string(),
                value: "max-age=60".to_string(),
            }
        );
    }

    #[test]
    fn test_invalidations_not_array() {
        let err = validate_rules(&[RuleConfig {
            invalidates: Some(json!("a.*")),
            ..rule("a.update")
        }])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidationsNotArray {
                index: 0,
                pattern: "a.update".to_string(),
                found: "a string".to_string(),
            }
        );
    }

    #[test]
    fn test_invalidation_entries() {
        let err = validate_rules(&[RuleConfig {
            invalidates: Some(json!(["a.*", ""])),
            ..rule("a.update")
        }])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyInvalidation {
                index: 0,
                pattern: "a.update".to_string(),
                position: 1,
            }
        );

        let err = validate_rules(&[RuleConfig {
            invalidates: Some(json!(["a.*", 7])),
            ..rule("a.update")
        }])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidationNotString { position: 1, .. }
        ));
    }

    #[test]
    fn test_invalidation_entries_checked_in_order() {
        let err = validate_rules(&[RuleConfig {
            invalidates: Some(json!(["", 7])),
            ..rule("a.update")
        }])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyInvalidation {
                index: 0,
                pattern: "a.update".to_string(),
                position: 0,
            }
        );

        let err = validate_rules(&[RuleConfig {
            invalidates: Some(json!([7, ""])),
            ..rule("a.update")
        }])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidationNotString { position: 0, .. }
        ));
    }

    #[test]
    fn test_fail_fast_reports_first_violation() {
        // Rule 0 has both a bad segment and a bad directive; the segment wins.
        let rules = vec![
            RuleConfig {
                directive: Some("bogus".to_string()),
                ..rule("a.b!")
            },
            rule(""),
        ];
        assert!(matches!(
            validate_rules(&rules).unwrap_err(),
            ConfigError::InvalidSegment { index: 0, .. }
        ));
    }

    #[test]
    fn test_validate_default() {
        let defaults = validate_default(&DefaultConfig {
            directive: Some("no-store".to_string()),
        })
        .unwrap();
        assert_eq!(defaults.directive, Some(Directive::NoStore));

        assert_eq!(
            validate_default(&DefaultConfig::default()).unwrap(),
            Defaults::new()
        );

        let err = validate_default(&DefaultConfig {
            directive: Some("max-age=0".to_string()),
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDefaultDirective {
                value: "max-age=0".to_string()
            }
        );
    }
}
