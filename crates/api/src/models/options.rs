use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Residual, collaborator-specific options passed through untouched.
pub type OptionMap = BTreeMap<String, serde_json::Value>;

/// How symbolic links are treated when building file instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Describe the link target.
    Follow,
    /// Describe the link itself.
    Manage,
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkMode::Follow => f.write_str("follow"),
            LinkMode::Manage => f.write_str("manage"),
        }
    }
}

impl FromStr for LinkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "follow" => Ok(LinkMode::Follow),
            "manage" => Ok(LinkMode::Manage),
            other => Err(format!(
                "unknown links mode '{}', expected follow or manage",
                other
            )),
        }
    }
}

/// Per-call options for `find`, `search` and `authorized`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOptions {
    /// Requesting node; its environment takes precedence over the default.
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub links: Option<LinkMode>,
    #[serde(default)]
    pub ipaddress: Option<String>,
    #[serde(default, flatten)]
    pub extra: OptionMap,
}

impl ResolutionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    pub fn with_links(mut self, links: LinkMode) -> Self {
        self.links = Some(links);
        self
    }

    pub fn with_ipaddress(mut self, ipaddress: impl Into<String>) -> Self {
        self.ipaddress = Some(ipaddress.into());
        self
    }

    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
