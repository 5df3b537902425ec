//! Freshness configuration types and loading.
//!
//! ```yaml
//! defaults:
//!   directive: no-store
//! rules:
//!   - pattern: sprints.update
//!     invalidates: ["sprints.*"]
//!   - pattern: "schema.**"
//!     directive: immutable
//! ```
//!
//! Values are kept loosely typed here and checked by
//! [`crate::policy::validate`] so that errors point at the rule and field.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FreshnessResult;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FreshnessConfig {
    /// Ordered rules; first match wins
    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    /// Applied when no rule matches, and to matched rules without a directive
    #[serde(default, alias = "default")]
    pub defaults: DefaultConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RuleConfig {
    #[serde(default, alias = "match")]
    pub pattern: String,

    /// "no-store" or "immutable"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,

    /// Patterns whose results become stale after a successful call
    #[serde(
        default,
        alias = "invalidates_patterns",
        alias = "invalidatesPatterns",
        skip_serializing_if = "Option::is_none"
    )]
    pub invalidates: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DefaultConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
}

impl FreshnessConfig {
    pub fn from_yaml_str(content: &str) -> FreshnessResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> FreshnessResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load configuration from a file. `.json` files are parsed as JSON,
    /// anything else as YAML.
    pub async fn from_file(path: impl AsRef<Path>) -> FreshnessResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::FreshnessError;

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
defaults:
  directive: no-store
rules:
  - pattern: sprints.update
    invalidates: ["sprints.*"]
  - match: "schema.**"
    directive: immutable
"#;

        let config = FreshnessConfig::from_yaml_str(yaml).expect("Failed to parse YAML");
        assert_eq!(config.defaults.directive.as_deref(), Some("no-store"));
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].pattern, "sprints.update");
        assert_eq!(config.rules[0].invalidates, Some(json!(["sprints.*"])));
        assert_eq!(config.rules[1].pattern, "schema.**");
        assert_eq!(config.rules[1].directive.as_deref(), Some("immutable"));
        assert!(config.rules[1].invalidates.is_none());
    }

    #[test]
    fn test_json_config_with_camel_case_aliases() {
        let raw = r#"{
            "default": {"directive": "immutable"},
            "rules": [{"match": "a.update", "invalidatesPatterns": ["a.*"]}]
        }"#;

        let config = FreshnessConfig::from_json_str(raw).unwrap();
        assert_eq!(config.defaults.directive.as_deref(), Some("immutable"));
        assert_eq!(config.rules[0].invalidates, Some(json!(["a.*"])));
    }

    #[test]
    fn test_non_array_invalidates_survives_parsing() {
        let yaml = r#"
rules:
  - pattern: a.update
    invalidates: "a.*"
"#;
        let config = FreshnessConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.rules[0].invalidates, Some(json!("a.*")));
    }

    #[test]
    fn test_empty_config() {
        let config = FreshnessConfig::from_yaml_str("{}").unwrap();
        assert!(config.rules.is_empty());
        assert!(config.defaults.directive.is_none());
    }

    #[test]
    fn test_malformed_yaml() {
        let err = FreshnessConfig::from_yaml_str("rules: [").unwrap_err();
        assert!(matches!(err, FreshnessError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_from_file_missing() {
        let err = FreshnessConfig::from_file("/nonexistent/freshness.yaml")
            .await
            .unwrap_err();
        assert!(matches!(err, FreshnessError::Io(_)));
    }
}
