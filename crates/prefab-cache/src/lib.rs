//! Prefab Cache - clone in-memory prefabs and keep them in a tiered cache.
//!
//! Mod code asks the registry for an instance of a prefab kind. The registry
//! finds a source object through the host's [`ObjectProvider`], clones it and,
//! depending on the tier, keeps the clone around for later calls:
//!
//! - [`PrefabRegistry::copy`]: a fresh, untracked clone
//! - [`PrefabRegistry::get_transient`]: a clone reused while the host keeps it
//!   alive
//! - [`PrefabRegistry::catch`] / [`PrefabRegistry::get_persistent`]: a clone
//!   retained across scene transitions until uncached
//!
//! # Example
//!
//! ```rust
//! use prefab_cache::{InMemoryProvider, PrefabRegistry};
//!
//! prefab_cache::prefab_kinds! {
//!     pub enum Prop {
//!         Barrel => "ExplosiveBarrel",
//!     }
//! }
//!
//! fn main() -> prefab_cache::Result<()> {
//!     let mut provider = InMemoryProvider::new();
//!     provider.add_source("ExplosiveBarrel", "Barrel");
//!     let mut registry: PrefabRegistry<_, Prop> = PrefabRegistry::new(provider);
//!
//!     // Plain copies are never tracked
//!     let loose = registry.copy(Prop::Barrel, None);
//!     assert!(loose.is_some());
//!
//!     // Persistent instances must be caught before they are fetched
//!     registry.catch(Prop::Barrel, None)?;
//!     let barrel = registry.get_persistent(Prop::Barrel)?;
//!     assert!(barrel.is_some());
//!
//!     registry.uncache(Prop::Barrel)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod kind;
pub mod naming;
pub mod provider;
pub mod registry;

// Re-export commonly used types
pub use config::{NamingConfig, RegistryConfig, SelectionPolicy};
pub use error::{PrefabError, Result};
pub use kind::PrefabKind;
pub use provider::{InMemoryProvider, ObjectId, ObjectProvider};
pub use registry::{
    CacheEntry, CacheTier, PrefabRegistry, PrefabRegistryBuilder, RegistryStats,
};
