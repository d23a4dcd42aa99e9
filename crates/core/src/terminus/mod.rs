//! Module file terminus.
//!
//! Translates `modules` mount requests into answers about files on disk:
//!
//! ```text
//! find / search / authorized
//!        │
//!        ▼
//! ModuleFileUri ──▶ environment ──▶ ModuleRegistry ──▶ FileSystem::exists
//!                                                          │
//!                                     ModelFactory / DirectoryExpander
//! ```
//!
//! The terminus holds no mutable state; every call is an independent,
//! single-pass resolution against its collaborators.

mod environment;

pub use environment::StaticEnvironment;

use crate::auth::MountAuthorizer;
use crate::fs::LocalFileSystem;
use crate::registry::InMemoryNodeRegistry;
use crate::uri::ModuleFileUri;
use environment::resolve_environment;
use modfiles_api::{
    AuthorizationRequest, DirectoryExpander, EnvironmentSource, FileServingAuthorizer, FileSystem,
    ModelFactory, ModuleRegistry, NodeRegistry, Operation, ResolutionOptions, ResolveError,
    ResolveResult,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolver for files served out of modules.
///
/// `I` is the result type produced by the model factory and directory expander.
pub struct ModuleFilesTerminus<I> {
    modules: Arc<dyn ModuleRegistry>,
    nodes: Arc<dyn NodeRegistry>,
    environment: Arc<dyn EnvironmentSource>,
    filesystem: Arc<dyn FileSystem>,
    factory: Arc<dyn ModelFactory<Instance = I>>,
    expander: Arc<dyn DirectoryExpander<Instance = I>>,
    authorizer: Arc<dyn FileServingAuthorizer>,
}

impl<I> Clone for ModuleFilesTerminus<I> {
    fn clone(&self) -> Self {
        Self {
            modules: self.modules.clone(),
            nodes: self.nodes.clone(),
            environment: self.environment.clone(),
            filesystem: self.filesystem.clone(),
            factory: self.factory.clone(),
            expander: self.expander.clone(),
            authorizer: self.authorizer.clone(),
        }
    }
}

pub struct ModuleFilesTerminusBuilder<I> {
    modules: Arc<dyn ModuleRegistry>,
    factory: Arc<dyn ModelFactory<Instance = I>>,
    expander: Arc<dyn DirectoryExpander<Instance = I>>,
    nodes: Option<Arc<dyn NodeRegistry>>,
    environment: Option<Arc<dyn EnvironmentSource>>,
    filesystem: Option<Arc<dyn FileSystem>>,
    authorizer: Option<Arc<dyn FileServingAuthorizer>>,
}

impl<I> ModuleFilesTerminusBuilder<I> {
    pub fn with_nodes(mut self, nodes: Arc<dyn NodeRegistry>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    pub fn with_environment(mut self, environment: Arc<dyn EnvironmentSource>) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_filesystem(mut self, filesystem: Arc<dyn FileSystem>) -> Self {
        self.filesystem = Some(filesystem);
        self
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn FileServingAuthorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    /// Unset collaborators default to: no known nodes, no default
    /// environment, the local filesystem and an authorizer without rules
    /// (which denies everything).
    pub fn build(self) -> ModuleFilesTerminus<I> {
        ModuleFilesTerminus {
            modules: self.modules,
            factory: self.factory,
            expander: self.expander,
            nodes: self
                .nodes
                .unwrap_or_else(|| Arc::new(InMemoryNodeRegistry::new())),
            environment: self
                .environment
                .unwrap_or_else(|| Arc::new(StaticEnvironment::unset())),
            filesystem: self.filesystem.unwrap_or_else(|| Arc::new(LocalFileSystem)),
            authorizer: self
                .authorizer
                .unwrap_or_else(|| Arc::new(MountAuthorizer::default())),
        }
    }
}

impl<I> ModuleFilesTerminus<I> {
    /// Create a builder for the terminus
    pub fn builder(
        modules: Arc<dyn ModuleRegistry>,
        factory: Arc<dyn ModelFactory<Instance = I>>,
        expander: Arc<dyn DirectoryExpander<Instance = I>>,
    ) -> ModuleFilesTerminusBuilder<I> {
        ModuleFilesTerminusBuilder {
            modules,
            factory,
            expander,
            nodes: None,
            environment: None,
            filesystem: None,
            authorizer: None,
        }
    }

    /// Returns the result for a single module file, or `None` when the module
    /// or the file does not exist.
    pub fn find(&self, uri: &str, options: &ResolutionOptions) -> ResolveResult<Option<I>> {
        let Some(path) = self.find_path(uri, options)? else {
            return Ok(None);
        };

        let instance = self
            .factory
            .construct(&path, options.links)
            .map_err(ResolveError::collaborator("model factory"))?;
        Ok(Some(instance))
    }

    /// Returns the expanded results for a module path, or `None` when the
    /// module or the path does not exist. `Some(vec![])` means the path
    /// resolved but expanded to nothing.
    ///
    /// The expander receives the caller's extra options plus `ipaddress` when
    /// one was given. `node` is consumed by environment resolution.
    pub fn search(&self, uri: &str, options: &ResolutionOptions) -> ResolveResult<Option<Vec<I>>> {
        let Some(path) = self.find_path(uri, options)? else {
            return Ok(None);
        };

        let mut forwarded = options.extra.clone();
        if let Some(ipaddress) = &options.ipaddress {
            forwarded.insert("ipaddress".to_string(), Value::from(ipaddress.as_str()));
        }

        let instances = self
            .expander
            .expand(&path, options.links, &forwarded)
            .map_err(ResolveError::collaborator("directory expander"))?;
        tracing::debug!("Expanded {} into {} instances", path.display(), instances.len());
        Ok(Some(instances))
    }

    /// Decides whether `operation` on `uri` is allowed.
    ///
    /// Module files are read-only: `save` and `destroy` are refused without
    /// asking the authorization service.
    pub fn authorized(
        &self,
        operation: &Operation,
        uri: &str,
        options: &ResolutionOptions,
    ) -> ResolveResult<bool> {
        if operation.is_mutating() {
            tracing::info!("Refusing {} on {}: module files are read-only", operation, uri);
            return Ok(false);
        }

        let key = ModuleFileUri::parse(uri)?.authorization_key();
        let request = AuthorizationRequest {
            node: options.node.clone(),
            ipaddress: options.ipaddress.clone(),
            extra: options.extra.clone(),
        };

        let allowed = self
            .authorizer
            .authorized(&key, &request)
            .map_err(ResolveError::collaborator("authorization service"))?;
        if !allowed {
            tracing::info!(
                "Denied {} on {} (node: {:?}, ip: {:?})",
                operation,
                key,
                request.node,
                request.ipaddress
            );
        }
        Ok(allowed)
    }

    /// Shared resolution pipeline of `find` and `search`.
    fn find_path(&self, uri: &str, options: &ResolutionOptions) -> ResolveResult<Option<PathBuf>> {
        let uri = ModuleFileUri::parse(uri)?;
        let environment = resolve_environment(
            options.node.as_deref(),
            self.nodes.as_ref(),
            self.environment.as_ref(),
        )?;

        let module = self
            .modules
            .find_module(uri.module_name(), environment.as_deref())
            .map_err(ResolveError::collaborator("module registry"))?;
        let Some(module) = module else {
            tracing::debug!(
                "No module '{}' in environment {:?}",
                uri.module_name(),
                environment
            );
            return Ok(None);
        };

        let path = uri.resolve_in(&module.path);
        if !self.filesystem.exists(&path) {
            tracing::debug!("Module '{}' has no file {}", module.name, path.display());
            return Ok(None);
        }

        Ok(Some(path))
    }
}
