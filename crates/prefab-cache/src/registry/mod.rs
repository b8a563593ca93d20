//! Tiered prefab cache registry.
//!
//! The registry keeps at most one live instance per prefab kind in each of
//! two tiers:
//! - **Persistent**: caught explicitly, retained across scene transitions,
//!   removed only by `uncache`/`uncache_all`
//! - **Transient**: cloned on demand and reused while the host keeps it alive
//!
//! Plain copies (`CacheTier::None`) are never tracked.

mod builder;
mod entry;
mod prefab_registry;

pub use builder::PrefabRegistryBuilder;
pub use entry::{CacheEntry, CacheTier, RegistryStats};
pub use prefab_registry::PrefabRegistry;
