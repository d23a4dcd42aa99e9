pub mod auth;
pub mod error;
pub mod instance;
pub mod models;
pub mod registry;

// Re-export commonly used types
pub use auth::{AuthorizationRequest, FileServingAuthorizer, Operation};
pub use error::{BoxError, CollaboratorResult, ResolveError, ResolveResult};
pub use instance::{DirectoryExpander, FileSystem, ModelFactory};
pub use models::*;
pub use registry::{EnvironmentSource, ModuleRegistry, NodeRegistry};
