//! Result construction for resolved paths.

use crate::error::CollaboratorResult;
use crate::models::{LinkMode, OptionMap};
use std::path::Path;

/// Existence predicate. Never reads file contents.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Builds the result for a single resolved file.
pub trait ModelFactory: Send + Sync {
    type Instance;

    fn construct(&self, path: &Path, links: Option<LinkMode>) -> CollaboratorResult<Self::Instance>;
}

/// Expands a resolved path into a sequence of results (`search`).
///
/// `options` carries the caller's residual options exactly as received.
pub trait DirectoryExpander: Send + Sync {
    type Instance;

    fn expand(
        &self,
        path: &Path,
        links: Option<LinkMode>,
        options: &OptionMap,
    ) -> CollaboratorResult<Vec<Self::Instance>>;
}
