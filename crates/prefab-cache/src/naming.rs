//! Display-name cleanup for cloned instances.
//!
//! Hosts decorate clone names (`"Crate"` becomes `"Crate(Clone)"`, and a clone
//! of a clone becomes `"Crate(Clone)(Clone)"`). The registry strips that
//! decoration so cached instances keep the name of their source.

use crate::config::NamingConfig;
use crate::error::{PrefabError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Pattern for the default suffix, compiled once.
static DEFAULT_SUFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&suffix_pattern(NamingConfig::DEFAULT_CLONE_SUFFIX)).unwrap());

/// Trailing, case-insensitive, possibly repeated occurrences of `suffix`.
fn suffix_pattern(suffix: &str) -> String {
    format!(r"(?i)(?:\s*{})+\s*$", regex::escape(suffix.trim()))
}

/// Removes clone decoration from instance names.
#[derive(Debug, Clone)]
pub struct CloneNameStripper {
    pattern: Regex,
}

impl CloneNameStripper {
    /// Build a stripper for a custom suffix.
    pub fn new(suffix: &str) -> Result<Self> {
        if suffix.trim().is_empty() {
            return Err(PrefabError::Config {
                message: "clone suffix must not be blank".to_string(),
            });
        }
        let pattern = Regex::new(&suffix_pattern(suffix)).map_err(|e| PrefabError::Config {
            message: format!("Invalid clone suffix {:?}: {}", suffix, e),
        })?;
        Ok(Self { pattern })
    }

    /// Strip every trailing occurrence of the suffix.
    ///
    /// A name made only of decoration is returned unchanged rather than
    /// emptied.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefab_cache::naming::CloneNameStripper;
    ///
    /// let stripper = CloneNameStripper::default();
    /// assert_eq!(stripper.strip("Crate(Clone)"), "Crate");
    /// assert_eq!(stripper.strip("Crate (Clone)(Clone)"), "Crate");
    /// assert_eq!(stripper.strip("Crate"), "Crate");
    /// ```
    pub fn strip<'a>(&self, name: &'a str) -> &'a str {
        match self.pattern.find(name) {
            Some(m) if m.start() > 0 => &name[..m.start()],
            _ => name,
        }
    }

    /// Whether `name` carries the decoration at all.
    pub fn is_decorated(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

impl Default for CloneNameStripper {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_SUFFIX_PATTERN.clone(),
        }
    }
}
