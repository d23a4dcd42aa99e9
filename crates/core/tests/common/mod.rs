//! Recording test doubles for the terminus collaborators.
#![allow(dead_code)]

use modfiles_api::{
    AuthorizationRequest, CollaboratorResult, DirectoryExpander, FileServingAuthorizer,
    FileSystem, LinkMode, ModelFactory, Module, ModuleRegistry, OptionMap,
};
use modfiles_core::ModuleFilesTerminus;
use modfiles_core::registry::InMemoryNodeRegistry;
use modfiles_core::terminus::StaticEnvironment;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const URI: &str = "puppetmounts://host/modules/my/local/file";
pub const MODULE_FILE: &str = "/module/path/files/local/file";

/// What the doubles hand back as a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestInstance {
    pub path: PathBuf,
    pub links: Option<LinkMode>,
}

#[derive(Default)]
pub struct RecordingModules {
    pub modules: HashMap<String, Module>,
    pub calls: Mutex<Vec<(String, Option<String>)>>,
    pub fail: bool,
}

impl RecordingModules {
    pub fn with(modules: Vec<(&str, Module)>) -> Self {
        Self {
            modules: modules
                .into_iter()
                .map(|(name, module)| (name.to_string(), module))
                .collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ModuleRegistry for RecordingModules {
    fn find_module(
        &self,
        name: &str,
        environment: Option<&str>,
    ) -> CollaboratorResult<Option<Module>> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), environment.map(str::to_string)));
        if self.fail {
            return Err("registry offline".into());
        }
        Ok(self.modules.get(name).cloned())
    }
}

#[derive(Default)]
pub struct RecordingFileSystem {
    pub existing: HashSet<PathBuf>,
    pub calls: Mutex<Vec<PathBuf>>,
}

impl RecordingFileSystem {
    pub fn with(existing: &[&str]) -> Self {
        Self {
            existing: existing.iter().map(PathBuf::from).collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl FileSystem for RecordingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.calls.lock().unwrap().push(path.to_path_buf());
        self.existing.contains(path)
    }
}

#[derive(Default)]
pub struct RecordingFactory {
    pub calls: Mutex<Vec<(PathBuf, Option<LinkMode>)>>,
}

impl ModelFactory for RecordingFactory {
    type Instance = TestInstance;

    fn construct(&self, path: &Path, links: Option<LinkMode>) -> CollaboratorResult<TestInstance> {
        self.calls.lock().unwrap().push((path.to_path_buf(), links));
        Ok(TestInstance {
            path: path.to_path_buf(),
            links,
        })
    }
}

#[derive(Default)]
pub struct RecordingExpander {
    pub calls: Mutex<Vec<(PathBuf, Option<LinkMode>, OptionMap)>>,
    /// Number of instances each expansion yields
    pub yields: usize,
}

impl DirectoryExpander for RecordingExpander {
    type Instance = TestInstance;

    fn expand(
        &self,
        path: &Path,
        links: Option<LinkMode>,
        options: &OptionMap,
    ) -> CollaboratorResult<Vec<TestInstance>> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), links, options.clone()));
        Ok((0..self.yields)
            .map(|i| TestInstance {
                path: path.join(format!("entry{}", i)),
                links,
            })
            .collect())
    }
}

pub struct RecordingAuthorizer {
    pub answer: bool,
    pub calls: Mutex<Vec<(String, AuthorizationRequest)>>,
}

impl RecordingAuthorizer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, AuthorizationRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

impl FileServingAuthorizer for RecordingAuthorizer {
    fn authorized(&self, key: &str, request: &AuthorizationRequest) -> CollaboratorResult<bool> {
        self.calls
            .lock()
            .unwrap()
            .push((key.to_string(), request.clone()));
        Ok(self.answer)
    }
}

/// A terminus wired to recording doubles, with handles to inspect them.
pub struct Harness {
    pub modules: Arc<RecordingModules>,
    pub nodes: Arc<InMemoryNodeRegistry>,
    pub filesystem: Arc<RecordingFileSystem>,
    pub factory: Arc<RecordingFactory>,
    pub expander: Arc<RecordingExpander>,
    pub authorizer: Arc<RecordingAuthorizer>,
    pub terminus: ModuleFilesTerminus<TestInstance>,
}


impl Harness {
    /// `mymod` at `/module/path` registered as `my`; `MODULE_FILE` exists.
    pub fn new() -> Self {
        Self::build(
            RecordingModules::with(vec![("my", Module::new("mymod", "/module/path"))]),
            RecordingFileSystem::with(&[MODULE_FILE]),
            StaticEnvironment::unset(),
            RecordingAuthorizer::answering(true),
        )
    }

    pub fn with_environment(environment: &str) -> Self {
        Self::build(
            RecordingModules::with(vec![("my", Module::new("mymod", "/module/path"))]),
            RecordingFileSystem::with(&[MODULE_FILE]),
            StaticEnvironment::new(environment),
            RecordingAuthorizer::answering(true),
        )
    }

    pub fn denying() -> Self {
        Self::build(
            RecordingModules::default(),
            RecordingFileSystem::default(),
            StaticEnvironment::unset(),
            RecordingAuthorizer::answering(false),
        )
    }

    pub fn build(
        modules: RecordingModules,
        filesystem: RecordingFileSystem,
        environment: StaticEnvironment,
        authorizer: RecordingAuthorizer,
    ) -> Self {
        let modules = Arc::new(modules);
        let nodes = Arc::new(InMemoryNodeRegistry::new());
        let filesystem = Arc::new(filesystem);
        let factory = Arc::new(RecordingFactory::default());
        let expander = Arc::new(RecordingExpander {
            yields: 2,
            ..Default::default()
        });
        let authorizer = Arc::new(authorizer);

        let terminus = ModuleFilesTerminus::<TestInstance>::builder(
            modules.clone(),
            factory.clone(),
            expander.clone(),
        )
        .with_nodes(nodes.clone())
        .with_environment(Arc::new(environment))
        .with_filesystem(filesystem.clone())
        .with_authorizer(authorizer.clone())
        .build();

        Self {
            modules,
            nodes,
            filesystem,
            factory,
            expander,
            authorizer,
            terminus,
        }
    }
}
