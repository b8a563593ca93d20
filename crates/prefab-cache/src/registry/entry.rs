//! Cache tiers, entries and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long the registry keeps hold of a loaded instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheTier {
    /// Not retained; the caller owns the instance.
    #[default]
    None,
    /// Retained across scene transitions until uncached.
    Persistent,
    /// Reused while alive; the host may destroy it at any time.
    Transient,
}

impl CacheTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheTier::None => "none",
            CacheTier::Persistent => "persistent",
            CacheTier::Transient => "transient",
        }
    }
}

impl std::fmt::Display for CacheTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cached instance handle with metadata.
///
/// Only the registry creates entries.
#[derive(Debug, Clone)]
pub struct CacheEntry<I> {
    instance: I,
    tier: CacheTier,
    cached_at: DateTime<Utc>,
}

impl<I> CacheEntry<I> {
    pub(crate) fn new(instance: I, tier: CacheTier) -> Self {
        Self {
            instance,
            tier,
            cached_at: Utc::now(),
        }
    }

    /// The provider handle. It may refer to an object the host has destroyed.
    pub fn instance(&self) -> &I {
        &self.instance
    }

    pub fn tier(&self) -> CacheTier {
        self.tier
    }

    /// When the entry was recorded.
    pub fn cached_at(&self) -> DateTime<Utc> {
        self.cached_at
    }

    pub(crate) fn into_instance(self) -> I {
        self.instance
    }
}

/// Snapshot of registry occupancy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Kinds holding known-cached status.
    pub known_cached: usize,
    /// Entries in the persistent mapping.
    pub persistent_entries: usize,
    /// Persistent entries whose instance is still alive.
    pub live_persistent_entries: usize,
    /// Entries in the transient mapping.
    pub transient_entries: usize,
    /// Transient entries whose instance is still alive.
    pub live_transient_entries: usize,
}

impl RegistryStats {
    /// Entries the host destroyed behind the registry's back.
    pub fn dead_entries(&self) -> usize {
        self.persistent_entries
            .saturating_sub(self.live_persistent_entries)
            + self
                .transient_entries
                .saturating_sub(self.live_transient_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_display() {
        assert_eq!(CacheTier::Persistent.to_string(), "persistent");
        assert_eq!(CacheTier::default(), CacheTier::None);
    }

    #[test]
    fn test_entry_metadata() {
        let before = Utc::now();
        let entry = CacheEntry::new(7u32, CacheTier::Transient);
        assert_eq!(*entry.instance(), 7);
        assert_eq!(entry.tier(), CacheTier::Transient);
        assert!(entry.cached_at() >= before);
    }

    #[test]
    fn test_dead_entries() {
        let stats = RegistryStats {
            known_cached: 2,
            persistent_entries: 2,
            live_persistent_entries: 1,
            transient_entries: 3,
            live_transient_entries: 1,
        };
        assert_eq!(stats.dead_entries(), 3);
    }

    #[test]
    fn test_dead_entries_with_inconsistent_counts() {
        let stats = RegistryStats {
            persistent_entries: 1,
            live_persistent_entries: 4,
            transient_entries: 2,
            live_transient_entries: 1,
            ..Default::default()
        };
        assert_eq!(stats.dead_entries(), 1);
    }
}
