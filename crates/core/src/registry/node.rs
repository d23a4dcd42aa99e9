//! In-memory implementation of NodeRegistry.

use modfiles_api::{CollaboratorResult, Node, NodeRegistry};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Thread-safe node name → node mapping
pub struct InMemoryNodeRegistry {
    nodes: RwLock<HashMap<String, Node>>,
}

impl InMemoryNodeRegistry {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
        }
    }

    /// Add or replace a node
    pub fn register(&self, node: Node) {
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        nodes.insert(node.name.clone(), node);
    }

    pub fn register_batch(&self, batch: impl IntoIterator<Item = Node>) {
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        for node in batch {
            nodes.insert(node.name.clone(), node);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryNodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry for InMemoryNodeRegistry {
    fn find_node(&self, name: &str) -> CollaboratorResult<Option<Node>> {
        let nodes = self
            .nodes
            .read()
            .map_err(|_| "node registry lock poisoned".to_string())?;
        Ok(nodes.get(name).cloned())
    }
}
