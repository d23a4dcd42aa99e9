//! Bundled registry implementations.

pub mod modulepath;
pub mod node;

pub use modulepath::ModulePathRegistry;
pub use node::InMemoryNodeRegistry;
