//! In-memory object graph for headless use.
//!
//! Models just enough of a host engine to drive a registry without one:
//! typed objects with names, parent links, a retained flag and scene unloads.
//! Objects added with [`InMemoryProvider::add_source`] stand in for loaded
//! prefab assets and survive [`InMemoryProvider::unload_scene`].

use super::traits::ObjectProvider;
use crate::config::NamingConfig;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Handle to an object in an [`InMemoryProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct ObjectRecord {
    name: String,
    /// Runtime type, first entry of `type_chain`.
    type_chain: Vec<String>,
    parent: Option<ObjectId>,
    is_source: bool,
    retained: bool,
    alive: bool,
}

impl ObjectRecord {
    fn runtime_type(&self) -> &str {
        &self.type_chain[0]
    }

    fn is_a(&self, type_name: &str) -> bool {
        self.type_chain.iter().any(|t| t == type_name)
    }
}

/// Host-less [`ObjectProvider`] backed by a `BTreeMap`.
///
/// Ids are handed out in increasing order, so provider order is creation
/// order.
#[derive(Debug)]
pub struct InMemoryProvider {
    objects: BTreeMap<ObjectId, ObjectRecord>,
    next_id: u64,
    clone_suffix: Option<String>,
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 0,
            clone_suffix: Some(NamingConfig::DEFAULT_CLONE_SUFFIX.to_string()),
        }
    }
}

impl InMemoryProvider {
    /// Create an empty object graph that decorates clones with `"(Clone)"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different clone decoration, or none.
    pub fn with_clone_suffix(mut self, suffix: Option<&str>) -> Self {
        self.clone_suffix = suffix.map(str::to_string);
        self
    }

    fn insert(&mut self, record: ObjectRecord) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, record);
        id
    }

    /// Add a source object whose runtime type is exactly `type_name`.
    pub fn add_source(&mut self, type_name: &str, name: &str) -> ObjectId {
        self.add_derived_source(type_name, &[], name)
    }

    /// Add a source object of type `runtime` that also derives from `bases`.
    ///
    /// `add_derived_source("ArmoredCrate", &["Crate"], ..)` is found by
    /// searches for either type but reports `ArmoredCrate` as its runtime type.
    pub fn add_derived_source(&mut self, runtime: &str, bases: &[&str], name: &str) -> ObjectId {
        let type_chain = std::iter::once(runtime)
            .chain(bases.iter().copied())
            .map(str::to_string)
            .collect();
        self.insert(ObjectRecord {
            name: name.to_string(),
            type_chain,
            parent: None,
            is_source: true,
            retained: false,
            alive: true,
        })
    }

    /// Destroy every live scene object that has no retained ancestor.
    ///
    /// Survival is decided by the hierarchy: an object lives on if it or any
    /// ancestor is retained. Children of destroyed objects are destroyed with
    /// them, retained or not. Sources are never unloaded.
    ///
    /// Returns the number of objects destroyed.
    pub fn unload_scene(&mut self) -> usize {
        let doomed: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(id, r)| r.alive && !r.is_source && !self.has_retained_ancestry(id))
            .map(|(id, _)| *id)
            .collect();

        let destroyed: usize = doomed.iter().map(|id| self.destroy_subtree(id)).sum();
        debug!("Scene unload destroyed {} object(s)", destroyed);
        destroyed
    }

    /// Whether `id` or one of its ancestors is retained.
    fn has_retained_ancestry(&self, id: &ObjectId) -> bool {
        let mut current = Some(*id);
        while let Some(id) = current {
            match self.objects.get(&id) {
                Some(record) if record.retained => return true,
                Some(record) => current = record.parent,
                None => return false,
            }
        }
        false
    }

    /// Destroy `id` and all of its live descendants.
    ///
    /// Returns the number of objects destroyed.
    fn destroy_subtree(&mut self, id: &ObjectId) -> usize {
        let mut destroyed = 0;
        let mut pending = vec![*id];
        while let Some(id) = pending.pop() {
            match self.objects.get_mut(&id) {
                Some(record) if record.alive => record.alive = false,
                _ => continue,
            }
            destroyed += 1;
            pending.extend(
                self.objects
                    .iter()
                    .filter(|(_, r)| r.alive && r.parent == Some(id))
                    .map(|(child, _)| *child),
            );
        }
        destroyed
    }

    /// Parent of a live or destroyed object.
    pub fn parent_of(&self, id: &ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(|r| r.parent)
    }

    /// Live direct children of an object, in creation order.
    pub fn children_of(&self, id: &ObjectId) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, r)| r.alive && r.parent == Some(*id))
            .map(|(child, _)| *child)
            .collect()
    }

    /// Whether the object was exempted from scene unloads.
    pub fn is_retained(&self, id: &ObjectId) -> bool {
        self.objects.get(id).is_some_and(|r| r.retained)
    }

    /// Runtime type of an object.
    pub fn type_name_of(&self, id: &ObjectId) -> Option<&str> {
        self.objects.get(id).map(ObjectRecord::runtime_type)
    }

    /// Number of live objects, sources included.
    pub fn live_count(&self) -> usize {
        self.objects.values().filter(|r| r.alive).count()
    }
}

impl ObjectProvider for InMemoryProvider {
    type Source = ObjectId;
    type Instance = ObjectId;

    fn find_sources(&self, type_name: &str) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, r)| r.alive && r.is_a(type_name))
            .map(|(id, _)| *id)
            .collect()
    }

    fn source_type_name(&self, source: &ObjectId) -> String {
        self.type_name_of(source).unwrap_or_default().to_string()
    }

    fn instantiate(&mut self, source: &ObjectId, parent: Option<&ObjectId>) -> ObjectId {
        let (name, type_chain) = match self.objects.get(source) {
            Some(r) => (r.name.clone(), r.type_chain.clone()),
            None => (String::new(), vec![String::new()]),
        };
        let name = match &self.clone_suffix {
            Some(suffix) => format!("{}{}", name, suffix),
            None => name,
        };
        self.insert(ObjectRecord {
            name,
            type_chain,
            parent: parent.copied(),
            is_source: false,
            retained: false,
            alive: true,
        })
    }

    fn name(&self, instance: &ObjectId) -> String {
        self.objects
            .get(instance)
            .map(|r| r.name.clone())
            .unwrap_or_default()
    }

    fn rename(&mut self, instance: &ObjectId, name: &str) {
        if let Some(record) = self.objects.get_mut(instance) {
            record.name = name.to_string();
        }
    }

    fn retain(&mut self, instance: &ObjectId) {
        if let Some(record) = self.objects.get_mut(instance) {
            record.retained = true;
        }
    }

    fn destroy(&mut self, instance: &ObjectId) {
        // Children go with their parent.
        self.destroy_subtree(instance);
    }

    fn is_alive(&self, instance: &ObjectId) -> bool {
        self.objects.get(instance).is_some_and(|r| r.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sources_in_creation_order() {
        let mut provider = InMemoryProvider::new();
        let a = provider.add_source("Lamp", "Desk Lamp");
        let b = provider.add_source("Lamp", "Floor Lamp");
        provider.add_source("Rug", "Rug");

        assert_eq!(provider.find_sources("Lamp"), vec![a, b]);
        assert!(provider.find_sources("Sofa").is_empty());
    }

    #[test]
    fn test_derived_sources_match_base_type() {
        let mut provider = InMemoryProvider::new();
        let armored = provider.add_derived_source("ArmoredCrate", &["Crate"], "Armored");

        assert_eq!(provider.find_sources("Crate"), vec![armored]);
        assert_eq!(provider.source_type_name(&armored), "ArmoredCrate");
    }

    #[test]
    fn test_instantiate_decorates_and_parents() {
        let mut provider = InMemoryProvider::new();
        let src = provider.add_source("Lamp", "Lamp");
        let root = provider.add_source("Room", "Room");

        let clone = provider.instantiate(&src, Some(&root));
        assert_eq!(provider.name(&clone), "Lamp(Clone)");
        assert_eq!(provider.parent_of(&clone), Some(root));
        assert_eq!(provider.children_of(&root), vec![clone]);
    }

    #[test]
    fn test_destroy_cascades_to_children() {
        let mut provider = InMemoryProvider::new();
        let src = provider.add_source("Lamp", "Lamp");
        let parent = provider.instantiate(&src, None);
        let child = provider.instantiate(&src, Some(&parent));

        provider.destroy(&parent);
        assert!(!provider.is_alive(&parent));
        assert!(!provider.is_alive(&child));
        assert!(provider.is_alive(&src));
    }

    #[test]
    fn test_unload_scene_spares_sources_and_retained() {
        let mut provider = InMemoryProvider::new();
        let src = provider.add_source("Lamp", "Lamp");
        let kept = provider.instantiate(&src, None);
        let lost = provider.instantiate(&src, None);
        provider.retain(&kept);

        assert_eq!(provider.unload_scene(), 1);
        assert!(provider.is_alive(&src));
        assert!(provider.is_alive(&kept));
        assert!(!provider.is_alive(&lost));
        assert_eq!(provider.live_count(), 2);
    }

    #[test]
    fn test_unload_scene_destroys_retained_child_of_scene_parent() {
        let mut provider = InMemoryProvider::new();
        let src = provider.add_source("Lamp", "Lamp");
        let parent = provider.instantiate(&src, None);
        let child = provider.instantiate(&src, Some(&parent));
        provider.retain(&child);

        assert_eq!(provider.unload_scene(), 2);
        assert!(!provider.is_alive(&parent));
        assert!(!provider.is_alive(&child));
    }

    #[test]
    fn test_unload_scene_keeps_children_of_retained_root() {
        let mut provider = InMemoryProvider::new();
        let src = provider.add_source("Lamp", "Lamp");
        let root = provider.instantiate(&src, None);
        let child = provider.instantiate(&src, Some(&root));
        let grandchild = provider.instantiate(&src, Some(&child));
        provider.retain(&root);

        assert_eq!(provider.unload_scene(), 0);
        assert!(provider.is_alive(&child));
        assert!(provider.is_alive(&grandchild));
        assert_eq!(provider.children_of(&root), vec![child]);
    }

    #[test]
    fn test_no_clone_suffix() {
        let mut provider = InMemoryProvider::new().with_clone_suffix(None);
        let src = provider.add_source("Lamp", "Lamp");
        let clone = provider.instantiate(&src, None);
        assert_eq!(provider.name(&clone), "Lamp");
    }
}
