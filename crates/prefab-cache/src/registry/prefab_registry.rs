//! The prefab cache registry.

use super::builder::PrefabRegistryBuilder;
use super::entry::{CacheEntry, CacheTier, RegistryStats};
use crate::config::{RegistryConfig, SelectionPolicy};
use crate::error::{PrefabError, Result};
use crate::kind::PrefabKind;
use crate::naming::CloneNameStripper;
use crate::provider::ObjectProvider;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Keyed store of cloned prefab instances.
///
/// One registry is meant to live for the whole process and be passed by
/// reference to the mod code that needs it. It is not thread-safe: every
/// call is expected on the host's main thread, and mutating calls take
/// `&mut self`.
///
/// Instances are held as provider handles. The registry never frees host
/// objects itself; it asks the provider to destroy them.
///
/// # Liveness
///
/// Both tiers check [`ObjectProvider::is_alive`] before handing out a cached
/// handle. A dead transient handle is replaced by a fresh copy. A dead
/// persistent handle is reported as `Ok(None)` and the kind stays cached
/// until [`uncache`](Self::uncache) is called.
///
/// # Example
///
/// ```
/// use prefab_cache::{InMemoryProvider, PrefabRegistry};
///
/// prefab_cache::prefab_kinds! {
///     enum Prop { Crate => "SupplyCrate" }
/// }
///
/// let mut provider = InMemoryProvider::new();
/// provider.add_source("SupplyCrate", "Supply Crate");
///
/// let mut registry: PrefabRegistry<_, Prop> = PrefabRegistry::new(provider);
/// assert!(registry.catch(Prop::Crate, None)?);
/// let cached = registry.get_persistent(Prop::Crate)?.expect("alive");
/// assert_eq!(registry.get_persistent(Prop::Crate)?, Some(cached));
/// # Ok::<(), prefab_cache::PrefabError>(())
/// ```
#[derive(Debug)]
pub struct PrefabRegistry<P: ObjectProvider, K: PrefabKind> {
    provider: P,
    config: RegistryConfig,
    /// `None` when name cleanup is disabled.
    stripper: Option<CloneNameStripper>,
    persistent: BTreeMap<K, CacheEntry<P::Instance>>,
    transient: BTreeMap<K, CacheEntry<P::Instance>>,
    /// Kinds holding known-cached status.
    known: BTreeSet<K>,
}

impl<P: ObjectProvider, K: PrefabKind> PrefabRegistry<P, K> {
    /// Create a registry with the default configuration.
    pub fn new(provider: P) -> Self {
        Self::from_parts(
            provider,
            RegistryConfig::default(),
            Some(CloneNameStripper::default()),
        )
    }

    /// Create a builder for a registry with custom settings.
    pub fn builder(provider: P) -> PrefabRegistryBuilder<P, K> {
        PrefabRegistryBuilder::new(provider)
    }

    /// Create a registry from a validated configuration.
    pub fn with_config(provider: P, config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        let stripper = if config.strip_clone_suffix {
            Some(CloneNameStripper::new(&config.clone_suffix)?)
        } else {
            None
        };
        Ok(Self::from_parts(provider, config, stripper))
    }

    fn from_parts(
        provider: P,
        config: RegistryConfig,
        stripper: Option<CloneNameStripper>,
    ) -> Self {
        Self {
            provider,
            config,
            stripper,
            persistent: BTreeMap::new(),
            transient: BTreeMap::new(),
            known: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider, e.g. for host-side object changes.
    ///
    /// Changes made here are invisible to the registry until the next
    /// liveness check.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Give the provider back. Cached instances are left to the host.
    pub fn into_provider(self) -> P {
        self.provider
    }

    // ========================================
    // Loading
    // ========================================

    /// Pick a source object for `kind` according to the selection policy.
    fn select_source(&self, kind: K) -> Option<P::Source> {
        let type_name = kind.type_name();
        let candidates = self.provider.find_sources(type_name);
        if candidates.len() > 1 {
            debug!(
                kind = type_name,
                candidates = candidates.len(),
                policy = %self.config.selection_policy,
                "Multiple source candidates"
            );
        }

        match self.config.selection_policy {
            SelectionPolicy::FirstCandidate => candidates.into_iter().next(),
            SelectionPolicy::ExactType => candidates
                .into_iter()
                .find(|source| self.provider.source_type_name(source) == type_name),
        }
    }

    /// Clone a fresh instance of `kind` without caching it.
    ///
    /// The clone is attached under `parent` when given and its clone
    /// decoration is stripped. Returns `None` when the provider has no source
    /// object for `kind`.
    pub fn copy(&mut self, kind: K, parent: Option<&P::Instance>) -> Option<P::Instance> {
        let Some(source) = self.select_source(kind) else {
            debug!(kind = kind.type_name(), "No source object found");
            return None;
        };

        let instance = self.provider.instantiate(&source, parent);

        if let Some(stripper) = &self.stripper {
            let name = self.provider.name(&instance);
            if stripper.is_decorated(&name) {
                self.provider.rename(&instance, stripper.strip(&name));
            }
        }

        debug!(kind = kind.type_name(), instance = ?instance, "Copied prefab");
        Some(instance)
    }

    /// Get the transient instance of `kind`, cloning a new one if needed.
    ///
    /// A caught kind hands back its live persistent instance, so a kind is
    /// never retrievable from both tiers at once. Otherwise the tracked
    /// instance is reused while the provider reports it alive. Returns `None`
    /// when a fresh copy is needed and no source exists.
    pub fn get_transient(&mut self, kind: K) -> Option<P::Instance> {
        if let Some(entry) = self.persistent.get(&kind) {
            if self.known.contains(&kind) && self.provider.is_alive(entry.instance()) {
                return Some(entry.instance().clone());
            }
        }

        if let Some(entry) = self.transient.get(&kind) {
            if self.provider.is_alive(entry.instance()) {
                return Some(entry.instance().clone());
            }
            debug!(
                kind = kind.type_name(),
                "Transient instance was destroyed by the host, reloading"
            );
            self.transient.remove(&kind);
        }

        let instance = self.copy(kind, None)?;
        self.transient.insert(
            kind,
            CacheEntry::new(instance.clone(), CacheTier::Transient),
        );
        Some(instance)
    }

    /// Get the persistent instance of `kind`.
    ///
    /// Fails with [`PrefabError::NotCached`] unless `kind` was caught first.
    /// Returns `Ok(None)` when the cached instance was destroyed out-of-band;
    /// it is never recreated here.
    pub fn get_persistent(&self, kind: K) -> Result<Option<P::Instance>> {
        if !self.known.contains(&kind) {
            return Err(PrefabError::not_cached(kind.type_name()));
        }

        match self.persistent.get(&kind) {
            Some(entry) if self.provider.is_alive(entry.instance()) => {
                Ok(Some(entry.instance().clone()))
            }
            Some(_) => {
                warn!(
                    kind = kind.type_name(),
                    "Persistent instance was destroyed out-of-band"
                );
                Ok(None)
            }
            None => {
                warn!(kind = kind.type_name(), "Cached kind has no persistent entry");
                Ok(None)
            }
        }
    }

    /// Clone `kind` and keep it in the persistent tier.
    ///
    /// Fails with [`PrefabError::AlreadyCached`] if `kind` is cached. Returns
    /// `Ok(false)` and records nothing when the provider has no source.
    ///
    /// A transient handle for `kind` is forgotten, not destroyed: from here on
    /// [`get_transient`](Self::get_transient) returns the persistent instance.
    pub fn catch(&mut self, kind: K, parent: Option<&P::Instance>) -> Result<bool> {
        if self.known.contains(&kind) {
            return Err(PrefabError::already_cached(kind.type_name()));
        }

        let Some(instance) = self.copy(kind, parent) else {
            warn!(kind = kind.type_name(), "Cannot cache prefab without a source object");
            return Ok(false);
        };

        self.provider.retain(&instance);
        if self.transient.remove(&kind).is_some() {
            debug!(kind = kind.type_name(), "Dropped transient entry superseded by cache");
        }
        self.known.insert(kind);
        self.persistent
            .insert(kind, CacheEntry::new(instance, CacheTier::Persistent));

        info!(kind = kind.type_name(), "Cached prefab");
        Ok(true)
    }

    /// Remove `kind` from the persistent tier and destroy its instance.
    ///
    /// Fails with [`PrefabError::NotCached`] if `kind` is not cached, so a
    /// second call for the same kind fails.
    pub fn uncache(&mut self, kind: K) -> Result<()> {
        if !self.known.remove(&kind) {
            return Err(PrefabError::not_cached(kind.type_name()));
        }

        if let Some(entry) = self.persistent.remove(&kind) {
            self.destroy_entry(kind, entry);
        }

        info!(kind = kind.type_name(), "Uncached prefab");
        Ok(())
    }

    /// Empty the persistent tier, destroying every instance in it.
    ///
    /// The transient tier is left alone. Returns the number of instances
    /// destroyed; instances the host already destroyed are not counted.
    pub fn uncache_all(&mut self) -> usize {
        self.known.clear();
        let entries = std::mem::take(&mut self.persistent);

        let mut destroyed = 0;
        for (kind, entry) in entries {
            if self.destroy_entry(kind, entry) {
                destroyed += 1;
            }
        }

        info!(destroyed, "Uncached all prefabs");
        destroyed
    }

    fn destroy_entry(&mut self, kind: K, entry: CacheEntry<P::Instance>) -> bool {
        let instance = entry.into_instance();
        if !self.provider.is_alive(&instance) {
            debug!(kind = kind.type_name(), "Instance already destroyed");
            return false;
        }
        self.provider.destroy(&instance);
        true
    }

    /// Load `kind` through the given tier.
    ///
    /// `None` copies, `Transient` goes through [`get_transient`](Self::get_transient),
    /// and `Persistent` catches the kind on first use before returning the
    /// cached instance.
    pub fn load(&mut self, kind: K, tier: CacheTier) -> Result<Option<P::Instance>> {
        match tier {
            CacheTier::None => Ok(self.copy(kind, None)),
            CacheTier::Transient => Ok(self.get_transient(kind)),
            CacheTier::Persistent => {
                if !self.is_cached(kind) && !self.catch(kind, None)? {
                    return Ok(None);
                }
                self.get_persistent(kind)
            }
        }
    }

    // ========================================
    // Introspection
    // ========================================

    /// Whether `kind` holds known-cached status.
    pub fn is_cached(&self, kind: K) -> bool {
        self.known.contains(&kind)
    }

    /// Cached kinds in key order.
    pub fn cached_kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.known.iter().copied()
    }

    pub fn persistent_count(&self) -> usize {
        self.persistent.len()
    }

    pub fn transient_count(&self) -> usize {
        self.transient.len()
    }

    /// The entry recorded for `kind` in a tier. `CacheTier::None` has none.
    pub fn entry(&self, kind: K, tier: CacheTier) -> Option<&CacheEntry<P::Instance>> {
        match tier {
            CacheTier::None => None,
            CacheTier::Persistent => self.persistent.get(&kind),
            CacheTier::Transient => self.transient.get(&kind),
        }
    }

    /// Drop transient handles whose objects the host destroyed.
    ///
    /// Returns the number of handles dropped.
    pub fn prune_transient(&mut self) -> usize {
        let before = self.transient.len();
        let provider = &self.provider;
        self.transient
            .retain(|_, entry| provider.is_alive(entry.instance()));
        let pruned = before - self.transient.len();
        if pruned > 0 {
            debug!(pruned, "Pruned dead transient entries");
        }
        pruned
    }

    /// Forget every transient handle without destroying the objects.
    pub fn clear_transient(&mut self) {
        self.transient.clear();
    }

    /// Snapshot of tier occupancy.
    pub fn stats(&self) -> RegistryStats {
        let live = |map: &BTreeMap<K, CacheEntry<P::Instance>>| {
            map.values()
                .filter(|entry| self.provider.is_alive(entry.instance()))
                .count()
        };

        RegistryStats {
            known_cached: self.known.len(),
            persistent_entries: self.persistent.len(),
            live_persistent_entries: live(&self.persistent),
            transient_entries: self.transient.len(),
            live_transient_entries: live(&self.transient),
        }
    }
}
