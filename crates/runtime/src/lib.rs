use modfiles_core::ModuleFilesTerminus;
use modfiles_core::auth::MountAuthorizer;
use modfiles_core::config::SiteConfig;
use modfiles_core::fs::LocalFileSystem;
use modfiles_core::metadata::{FileMetadata, MetadataFactory, MetadataWalker};
use modfiles_core::registry::{InMemoryNodeRegistry, ModulePathRegistry};
use modfiles_core::terminus::StaticEnvironment;
use std::path::Path;
use std::sync::Arc;

/// Assembles a terminus serving module files from local disk, as described
/// by the site configuration.
pub fn build_terminus(config: &SiteConfig) -> ModuleFilesTerminus<FileMetadata> {
    let modules = config.environments.iter().fold(
        ModulePathRegistry::new(config.modulepath.clone()),
        |registry, (name, env)| registry.with_environment(name.clone(), env.modulepath.clone()),
    );

    let nodes = InMemoryNodeRegistry::new();
    nodes.register_batch(config.node_list());

    tracing::debug!(
        "Serving modules from {} path entries, {} environments, {} nodes, {} mount rules",
        config.modulepath.len(),
        config.environments.len(),
        nodes.len(),
        config.authorization.len()
    );

    ModuleFilesTerminus::<FileMetadata>::builder(
        Arc::new(modules),
        Arc::new(MetadataFactory),
        Arc::new(MetadataWalker),
    )
    .with_nodes(Arc::new(nodes))
    .with_environment(Arc::new(StaticEnvironment::new(config.environment.clone())))
    .with_filesystem(Arc::new(LocalFileSystem))
    .with_authorizer(Arc::new(MountAuthorizer::new(config.authorization.clone())))
    .build()
}

/// Loads the site configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and an empty configuration otherwise.
pub fn load_config(path: Option<&Path>) -> modfiles_core::Result<SiteConfig> {
    if let Some(path) = path {
        return SiteConfig::load(path);
    }

    let default = SiteConfig::default_path();
    if default.exists() {
        SiteConfig::load(&default)
    } else {
        tracing::warn!(
            "No site configuration at {}, serving nothing",
            default.display()
        );
        Ok(SiteConfig::default())
    }
}

/// Starts file logging for `component`, mirrored to stderr when `verbose`.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_logging(component: &str, verbose: bool) -> Option<impl Drop> {
    Some(modfiles_core::logging::init_logging(component, verbose))
}
