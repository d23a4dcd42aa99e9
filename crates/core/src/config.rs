//! Site configuration.
//!
//! Loaded from JSON, by default `~/.modfiles/site.json`:
//!
//! ```json
//! {
//!   "environment": "",
//!   "modulepath": ["/etc/modfiles/modules"],
//!   "environments": { "testing": { "modulepath": ["/srv/testing/modules"] } },
//!   "nodes": { "web01.example.com": { "environment": "testing" } },
//!   "authorization": [ { "path": "/modules", "allow": ["*.example.com"] } ]
//! }
//! ```

use crate::auth::MountRule;
use crate::error::{ModfilesError, Result};
use modfiles_api::Node;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "site.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub modulepath: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Default environment; empty means none.
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub modulepath: Vec<PathBuf>,
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeConfig>,
    #[serde(default)]
    pub authorization: Vec<MountRule>,
}

impl SiteConfig {
    /// `~/.modfiles`
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".modfiles")
    }

    pub fn default_path() -> PathBuf {
        Self::default_dir().join(CONFIG_FILE)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        tracing::info!("Loaded site configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for rule in &self.authorization {
            if !rule.path.starts_with('/') {
                return Err(ModfilesError::Config(format!(
                    "authorization path '{}' must be absolute",
                    rule.path
                )));
            }
        }
        for (name, env) in &self.environments {
            if name.is_empty() {
                return Err(ModfilesError::Config(
                    "environment names must not be empty".to_string(),
                ));
            }
            if env.modulepath.is_empty() {
                tracing::warn!("Environment {} has an empty modulepath", name);
            }
        }
        Ok(())
    }

    pub fn node_list(&self) -> Vec<Node> {
        self.nodes
            .iter()
            .map(|(name, node)| Node::new(name.clone(), node.environment.clone()))
            .collect()
    }
}
