//! Registries the resolver consults before touching the filesystem.

use crate::error::CollaboratorResult;
use crate::models::{Module, Node};

/// Resolves a module name, scoped by an optional environment, to a module.
pub trait ModuleRegistry: Send + Sync {
    /// Returns `Ok(None)` when the module is unknown in that environment.
    fn find_module(
        &self,
        name: &str,
        environment: Option<&str>,
    ) -> CollaboratorResult<Option<Module>>;
}

/// Resolves a node name to its descriptor.
pub trait NodeRegistry: Send + Sync {
    fn find_node(&self, name: &str) -> CollaboratorResult<Option<Node>>;
}

/// Process-wide default environment.
///
/// An empty string means "no environment".
pub trait EnvironmentSource: Send + Sync {
    fn current_environment(&self) -> String;
}
