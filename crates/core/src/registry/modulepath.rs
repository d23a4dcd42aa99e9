//! Module lookup along a module path.
//!
//! A module is a directory named after the module inside one of the module
//! path directories. Each environment may carry its own module path; the
//! global one applies otherwise. The first directory that holds the module
//! wins.

use modfiles_api::{CollaboratorResult, Module, ModuleRegistry};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct ModulePathRegistry {
    modulepath: Vec<PathBuf>,
    environments: HashMap<String, Vec<PathBuf>>,
}

impl ModulePathRegistry {
    pub fn new(modulepath: Vec<PathBuf>) -> Self {
        Self {
            modulepath,
            environments: HashMap::new(),
        }
    }

    /// Give an environment its own module path.
    pub fn with_environment(
        mut self,
        environment: impl Into<String>,
        modulepath: Vec<PathBuf>,
    ) -> Self {
        self.environments.insert(environment.into(), modulepath);
        self
    }

    /// Directories searched for the given environment.
    pub fn modulepath(&self, environment: Option<&str>) -> &[PathBuf] {
        environment
            .and_then(|env| self.environments.get(env))
            .unwrap_or(&self.modulepath)
    }

    /// Module names are single, non-special path components.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains('/')
            && !name.contains('\\')
            && !name.contains('\0')
    }
}

impl ModuleRegistry for ModulePathRegistry {
    fn find_module(
        &self,
        name: &str,
        environment: Option<&str>,
    ) -> CollaboratorResult<Option<Module>> {
        if !Self::is_valid_name(name) {
            return Ok(None);
        }

        let found = self
            .modulepath(environment)
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_dir());

        Ok(found.map(|path| Module::new(name, path)))
    }
}
