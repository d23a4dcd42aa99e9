use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A module as known to the module registry.
///
/// The resolver only reads it: `path` is the module's base directory,
/// and served files live under `<path>/files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub path: PathBuf,
}

impl Module {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Directory holding the files a module serves.
    pub fn files_dir(&self) -> PathBuf {
        self.path.join("files")
    }
}

/// A node (client machine) as known to the node registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub environment: Option<String>,
}

impl Node {
    pub fn new(name: impl Into<String>, environment: Option<String>) -> Self {
        Self {
            name: name.into(),
            environment,
        }
    }
}
