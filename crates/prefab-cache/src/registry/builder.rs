//! Builder for configuring a [`PrefabRegistry`].

use super::prefab_registry::PrefabRegistry;
use crate::config::{RegistryConfig, SelectionPolicy};
use crate::error::Result;
use crate::kind::PrefabKind;
use crate::provider::ObjectProvider;
use std::marker::PhantomData;

/// Builder for a [`PrefabRegistry`].
///
/// # Example
///
/// ```
/// use prefab_cache::{InMemoryProvider, PrefabRegistry, SelectionPolicy};
///
/// prefab_cache::prefab_kinds! {
///     enum Prop { Lamp => "Lamp" }
/// }
///
/// let registry: PrefabRegistry<_, Prop> = PrefabRegistry::builder(InMemoryProvider::new())
///     .selection_policy(SelectionPolicy::ExactType)
///     .clone_suffix(" [copy]")
///     .build()?;
/// assert_eq!(registry.config().clone_suffix, " [copy]");
/// # Ok::<(), prefab_cache::PrefabError>(())
/// ```
pub struct PrefabRegistryBuilder<P, K> {
    provider: P,
    config: RegistryConfig,
    _kind: PhantomData<K>,
}

impl<P: ObjectProvider, K: PrefabKind> PrefabRegistryBuilder<P, K> {
    /// Create a builder around the host's object provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: RegistryConfig::default(),
            _kind: PhantomData,
        }
    }

    /// Replace all settings at once, e.g. with a config loaded by the host.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// How a source is chosen among several candidates.
    ///
    /// Default: [`SelectionPolicy::FirstCandidate`]
    pub fn selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.config.selection_policy = policy;
        self
    }

    /// Strip clone decoration from new instance names.
    ///
    /// Default: `true`
    pub fn strip_clone_suffix(mut self, enable: bool) -> Self {
        self.config.strip_clone_suffix = enable;
        self
    }

    /// The decoration the host appends to cloned names.
    ///
    /// Default: `"(Clone)"`
    pub fn clone_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.clone_suffix = suffix.into();
        self
    }

    /// Validate the settings and build the registry.
    pub fn build(self) -> Result<PrefabRegistry<P, K>> {
        PrefabRegistry::with_config(self.provider, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrefabError;
    use crate::provider::InMemoryProvider;

    crate::prefab_kinds! {
        enum Prop { Lamp => "Lamp" }
    }

    #[test]
    fn test_builder_defaults() {
        let registry: PrefabRegistry<_, Prop> = PrefabRegistryBuilder::new(InMemoryProvider::new())
            .build()
            .unwrap();
        assert_eq!(registry.config(), &RegistryConfig::default());
    }

    #[test]
    fn test_builder_rejects_blank_suffix() {
        let result: Result<PrefabRegistry<_, Prop>> =
            PrefabRegistryBuilder::new(InMemoryProvider::new())
                .clone_suffix("")
                .build();
        assert!(matches!(result, Err(PrefabError::Config { .. })));
    }

    #[test]
    fn test_builder_custom_suffix_strips_names() {
        let mut provider = InMemoryProvider::new().with_clone_suffix(Some(" [copy]"));
        provider.add_source("Lamp", "Lamp");
        let mut registry: PrefabRegistry<_, Prop> = PrefabRegistryBuilder::new(provider)
            .clone_suffix("[copy]")
            .build()
            .unwrap();

        let lamp = registry.copy(Prop::Lamp, None).unwrap();
        assert_eq!(registry.provider().name(&lamp), "Lamp");
    }

    #[test]
    fn test_builder_config_from_host() {
        let config = RegistryConfig {
            selection_policy: SelectionPolicy::ExactType,
            ..Default::default()
        };
        let registry: PrefabRegistry<_, Prop> = PrefabRegistryBuilder::new(InMemoryProvider::new())
            .config(config.clone())
            .build()
            .unwrap();
        assert_eq!(registry.config(), &config);
    }
}
