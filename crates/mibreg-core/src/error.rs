//! Registry error types

use thiserror::Error;

/// Errors raised while resolving, loading or defining modules
///
/// Errors are `Clone` so that a failed load can be replayed to every later
/// request for the same module within one resolve call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Symbol not found in the target module's exports
    #[error("Symbol '{symbol}' not found in module '{module}'")]
    UnresolvedSymbol { module: String, symbol: String },

    /// Module load graph contains a cycle; first and last entries are equal
    #[error("Circular dependency detected: {}", .0.join(" -> "))]
    CircularDependency(Vec<String>),

    /// No loader could produce the module
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    /// The loader returned without publishing the module it was asked for
    #[error("Module '{0}' was loaded but never published")]
    NotPublished(String),

    /// Export exists but is the wrong kind for the importer
    #[error("Symbol '{symbol}' in module '{module}' has wrong kind: expected {expected}, got {actual}")]
    SymbolKind {
        module: String,
        symbol: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Nested on-demand loads went deeper than the configured limit
    #[error("Loading module '{module}' exceeds maximum load depth {depth}")]
    LoadDepthExceeded { module: String, depth: usize },

    /// A module body rejected its own definitions
    #[error("Module '{module}': {message}")]
    Definition { module: String, message: String },
}

impl RegistryError {
    /// Module the error is about, when there is a single one
    pub fn module(&self) -> Option<&str> {
        match self {
            Self::UnresolvedSymbol { module, .. }
            | Self::SymbolKind { module, .. }
            | Self::LoadDepthExceeded { module, .. }
            | Self::Definition { module, .. } => Some(module),
            Self::ModuleNotFound(module) | Self::NotPublished(module) => Some(module),
            Self::CircularDependency(_) => None,
        }
    }
}

/// Registry operation result
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message() {
        let err = RegistryError::CircularDependency(vec!["A".into(), "B".into(), "A".into()]);
        assert_eq!(err.to_string(), "Circular dependency detected: A -> B -> A");
        assert_eq!(err.module(), None);
    }

    #[test]
    fn test_unresolved_message() {
        let err = RegistryError::UnresolvedSymbol {
            module: "M".into(),
            symbol: "x".into(),
        };
        assert_eq!(err.to_string(), "Symbol 'x' not found in module 'M'");
        assert_eq!(err.module(), Some("M"));
    }
}
