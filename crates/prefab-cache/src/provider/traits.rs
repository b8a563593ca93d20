//! Object provider trait.

use std::fmt::Debug;

/// Access to the host's live object graph.
///
/// The registry never owns host objects. It holds handles returned by the
/// provider and asks the provider to find, clone, rename, retain and destroy
/// them. All calls happen on the host's main thread.
pub trait ObjectProvider {
    /// A candidate object to clone from.
    type Source: Clone + Debug;

    /// A handle to a live (or formerly live) host object.
    type Instance: Clone + Debug;

    /// Find existing objects of `type_name`, in provider order.
    ///
    /// Returns an empty list when nothing matches. Candidates may include
    /// objects whose runtime type derives from `type_name`.
    fn find_sources(&self, type_name: &str) -> Vec<Self::Source>;

    /// Runtime type name of a source, used for exact-type selection.
    fn source_type_name(&self, source: &Self::Source) -> String;

    /// Clone `source`, attaching the clone under `parent` when given.
    fn instantiate(
        &mut self,
        source: &Self::Source,
        parent: Option<&Self::Instance>,
    ) -> Self::Instance;

    /// Current display name of an instance.
    fn name(&self, instance: &Self::Instance) -> String;

    /// Relabel an instance.
    fn rename(&mut self, instance: &Self::Instance, name: &str);

    /// Exempt an instance from destruction on scene transitions.
    fn retain(&mut self, instance: &Self::Instance);

    /// Request destruction. The host decides when memory is actually freed.
    fn destroy(&mut self, instance: &Self::Instance);

    /// Whether the handle still refers to a live object.
    fn is_alive(&self, instance: &Self::Instance) -> bool;
}
