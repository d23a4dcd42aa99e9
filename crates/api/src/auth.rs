use crate::error::CollaboratorResult;
use crate::models::OptionMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operation a caller wants to perform on a module file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Find,
    Search,
    Save,
    Destroy,
    /// Any other operation name; treated as non-mutating.
    #[serde(untagged)]
    Other(String),
}

impl Operation {
    /// Operations that would change the backing store.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Operation::Save | Operation::Destroy)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Find => f.write_str("find"),
            Operation::Search => f.write_str("search"),
            Operation::Save => f.write_str("save"),
            Operation::Destroy => f.write_str("destroy"),
            Operation::Other(name) => f.write_str(name),
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err("operation name must not be empty".to_string()),
            "find" => Ok(Operation::Find),
            "search" => Ok(Operation::Search),
            "save" => Ok(Operation::Save),
            "destroy" => Ok(Operation::Destroy),
            other => Ok(Operation::Other(other.to_string())),
        }
    }
}

/// Who is asking, as presented to the authorization service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub node: Option<String>,
    pub ipaddress: Option<String>,
    #[serde(default, flatten)]
    pub extra: OptionMap,
}

/// File-serving authorization service holding the allow/deny policy.
pub trait FileServingAuthorizer: Send + Sync {
    /// `key` always starts with the `/modules` mount.
    fn authorized(&self, key: &str, request: &AuthorizationRequest) -> CollaboratorResult<bool>;
}
