//! Error types for the prefab cache.
//!
//! A missing source object is not an error: lookups that can come up empty
//! return `Option`. The variants here are ordering mistakes made by the calling
//! mod code, plus configuration problems caught when a registry is built.

use thiserror::Error;

/// Main error type for the prefab cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefabError {
    // Cache membership errors
    #[error("Prefab not cached: {kind}")]
    NotCached { kind: String },

    #[error("Prefab already cached: {kind}")]
    AlreadyCached { kind: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for prefab cache operations.
pub type Result<T> = std::result::Result<T, PrefabError>;

impl PrefabError {
    pub(crate) fn not_cached(kind: &str) -> Self {
        PrefabError::NotCached {
            kind: kind.to_string(),
        }
    }

    pub(crate) fn already_cached(kind: &str) -> Self {
        PrefabError::AlreadyCached {
            kind: kind.to_string(),
        }
    }

    /// Check if this error comes from calling cache operations out of order.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            PrefabError::NotCached { .. } | PrefabError::AlreadyCached { .. }
        )
    }

    /// Type name of the prefab the error refers to, if any.
    pub fn kind(&self) -> Option<&str> {
        match self {
            PrefabError::NotCached { kind } | PrefabError::AlreadyCached { kind } => Some(kind),
            PrefabError::Config { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrefabError::not_cached("ShipHull");
        assert_eq!(err.to_string(), "Prefab not cached: ShipHull");

        let err = PrefabError::already_cached("ShipHull");
        assert_eq!(err.to_string(), "Prefab already cached: ShipHull");
    }

    #[test]
    fn test_misuse_errors() {
        assert!(PrefabError::not_cached("A").is_misuse());
        assert!(PrefabError::already_cached("A").is_misuse());
        assert!(!PrefabError::Config {
            message: "bad suffix".into()
        }
        .is_misuse());
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(PrefabError::not_cached("Lamp").kind(), Some("Lamp"));
        assert_eq!(
            PrefabError::Config {
                message: "x".into()
            }
            .kind(),
            None
        );
    }
}
