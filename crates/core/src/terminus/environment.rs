//! Environment resolution for a single request.

use modfiles_api::{EnvironmentSource, NodeRegistry, ResolveError, ResolveResult};

/// A fixed default environment, typically read from configuration.
///
/// The empty string means "no environment".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticEnvironment(String);

impl StaticEnvironment {
    pub fn new(environment: impl Into<String>) -> Self {
        Self(environment.into())
    }

    pub fn unset() -> Self {
        Self::default()
    }
}

impl EnvironmentSource for StaticEnvironment {
    fn current_environment(&self) -> String {
        self.0.clone()
    }
}

/// Picks the environment used to look up a module.
///
/// A requesting node always decides; the default only applies when no node
/// is given. An unknown node is an error rather than a fallback to the default.
pub(crate) fn resolve_environment(
    node: Option<&str>,
    nodes: &dyn NodeRegistry,
    default: &dyn EnvironmentSource,
) -> ResolveResult<Option<String>> {
    if let Some(name) = node {
        let found = nodes
            .find_node(name)
            .map_err(ResolveError::collaborator("node registry"))?
            .ok_or_else(|| ResolveError::UnknownNode(name.to_string()))?;
        tracing::debug!(
            "Node {} is in environment {:?}",
            name,
            found.environment
        );
        return Ok(found.environment);
    }

    let environment = default.current_environment();
    if environment.is_empty() {
        Ok(None)
    } else {
        Ok(Some(environment))
    }
}
