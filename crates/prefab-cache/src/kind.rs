//! Prefab kinds: the keys of the cache.
//!
//! Kinds are declared at compile time, usually with [`prefab_kinds!`], and
//! carry the runtime type name the provider searches for.

use std::fmt::Debug;
use std::hash::Hash;

/// A kind of prefab the registry can copy and cache.
///
/// Each value names one host type. Two values reporting the same type name
/// are still distinct cache keys; keeping names unique is up to the caller.
pub trait PrefabKind: Copy + Eq + Ord + Hash + Debug {
    /// Runtime type name used to locate source objects.
    fn type_name(&self) -> &'static str;
}

/// Declare an enum of prefab kinds and its type names.
///
/// ```
/// prefab_cache::prefab_kinds! {
///     pub enum Prop {
///         Barrel => "ExplosiveBarrel",
///         Crate => "SupplyCrate",
///     }
/// }
///
/// use prefab_cache::PrefabKind;
/// assert_eq!(Prop::Barrel.type_name(), "ExplosiveBarrel");
/// assert_eq!(Prop::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! prefab_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $type_name:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            /// Every declared kind, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::PrefabKind for $name {
            fn type_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $type_name),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::PrefabKind::type_name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::prefab_kinds! {
        enum Furniture {
            Chair => "WoodenChair",
            Table => "Table",
        }
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Furniture::Chair.type_name(), "WoodenChair");
        assert_eq!(Furniture::Table.to_string(), "Table");
    }

    #[test]
    fn test_all_in_declaration_order() {
        assert_eq!(Furniture::ALL, &[Furniture::Chair, Furniture::Table]);
        assert!(Furniture::Chair < Furniture::Table);
    }
}
