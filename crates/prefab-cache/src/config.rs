//! Centralized configuration for the prefab cache.
//!
//! Constants live on unit structs; per-registry settings live on
//! [`RegistryConfig`], which can be loaded from any serde format the host uses.

use crate::error::{PrefabError, Result};
use serde::{Deserialize, Serialize};

/// Display-name handling for cloned instances.
pub struct NamingConfig;

impl NamingConfig {
    /// Decoration hosts append to the names of cloned objects.
    pub const DEFAULT_CLONE_SUFFIX: &'static str = "(Clone)";
}

/// How a source object is picked when the provider returns several candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Take the first candidate in provider order.
    #[default]
    FirstCandidate,
    /// Take the first candidate whose runtime type name equals the requested
    /// kind exactly. Subclass matches are skipped.
    ExactType,
}

impl SelectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPolicy::FirstCandidate => "first_candidate",
            SelectionPolicy::ExactType => "exact_type",
        }
    }
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for a single [`PrefabRegistry`](crate::PrefabRegistry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RegistryConfig {
    /// Source selection when several candidates exist.
    pub selection_policy: SelectionPolicy,
    /// Whether clone decoration is stripped from new instance names.
    pub strip_clone_suffix: bool,
    /// The decoration to strip.
    pub clone_suffix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            selection_policy: SelectionPolicy::default(),
            strip_clone_suffix: true,
            clone_suffix: NamingConfig::DEFAULT_CLONE_SUFFIX.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Reject settings a registry cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.strip_clone_suffix && self.clone_suffix.trim().is_empty() {
            return Err(PrefabError::Config {
                message: "clone_suffix must not be blank while strip_clone_suffix is enabled"
                    .to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RegistryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.selection_policy, SelectionPolicy::FirstCandidate);
        assert_eq!(config.clone_suffix, "(Clone)");
    }

    #[test]
    fn test_blank_suffix_rejected() {
        let config = RegistryConfig {
            clone_suffix: "  ".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PrefabError::Config { .. }));

        // Irrelevant once stripping is off.
        let config = RegistryConfig {
            strip_clone_suffix: false,
            clone_suffix: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"selection_policy": "exact_type"}"#).unwrap();
        assert_eq!(config.selection_policy, SelectionPolicy::ExactType);
        assert!(config.strip_clone_suffix);
        assert_eq!(config.clone_suffix, NamingConfig::DEFAULT_CLONE_SUFFIX);
    }

    #[test]
    fn test_selection_policy_serializes_snake_case() {
        let json = serde_json::to_string(&SelectionPolicy::ExactType).unwrap();
        assert_eq!(json, r#""exact_type""#);
        assert_eq!(SelectionPolicy::FirstCandidate.to_string(), "first_candidate");
    }
}
