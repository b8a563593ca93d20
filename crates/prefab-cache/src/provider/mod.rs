//! Host object access for the prefab cache.
//!
//! The registry talks to the host engine only through [`ObjectProvider`].
//! [`InMemoryProvider`] implements it without an engine, for tools and tests.

mod memory;
mod traits;

pub use memory::{InMemoryProvider, ObjectId};
pub use traits::ObjectProvider;
