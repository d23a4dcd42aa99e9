//! Mount-rule authorization for the file-serving namespace.
//!
//! Each rule covers a path prefix (`/modules`, `/modules/ntp`, ...) and lists
//! `allow` and `deny` patterns. The most specific rule covering a key decides;
//! within it a matching `deny` beats a matching `allow`. Keys no rule covers
//! are denied.
//!
//! Patterns match the requesting node name or IP address:
//! - `*` matches anyone
//! - `*.example.com` matches node names in that domain
//! - `10.0.0.*` matches addresses with that prefix
//! - anything else must equal the node name or the address

use modfiles_api::{AuthorizationRequest, CollaboratorResult, FileServingAuthorizer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountRule {
    pub path: String,
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub deny: Vec<String>,
}

impl MountRule {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn allow(mut self, pattern: impl Into<String>) -> Self {
        self.allow.push(pattern.into());
        self
    }

    pub fn deny(mut self, pattern: impl Into<String>) -> Self {
        self.deny.push(pattern.into());
        self
    }

    /// Whether `key` lies at or below this rule's path, segment-wise.
    fn covers(&self, key: &str) -> bool {
        let prefix = self.path.trim_end_matches('/');
        match key.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    fn decide(&self, request: &AuthorizationRequest) -> bool {
        let matched = |patterns: &[String]| patterns.iter().any(|p| pattern_matches(p, request));
        !matched(&self.deny) && matched(&self.allow)
    }
}

fn pattern_matches(pattern: &str, request: &AuthorizationRequest) -> bool {
    let node = request.node.as_deref();
    let ip = request.ipaddress.as_deref();

    if pattern == "*" {
        return true;
    }
    if let Some(domain) = pattern.strip_prefix("*.") {
        return node.is_some_and(|n| n.ends_with(&format!(".{}", domain)));
    }
    if let Some(network) = pattern.strip_suffix(".*") {
        return ip.is_some_and(|addr| addr.starts_with(&format!("{}.", network)));
    }
    node == Some(pattern) || ip == Some(pattern)
}

#[derive(Debug, Clone, Default)]
pub struct MountAuthorizer {
    rules: Vec<MountRule>,
}

impl MountAuthorizer {
    pub fn new(rules: Vec<MountRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[MountRule] {
        &self.rules
    }

    /// The most specific rule covering `key`, if any.
    fn rule_for(&self, key: &str) -> Option<&MountRule> {
        self.rules
            .iter()
            .filter(|rule| rule.covers(key))
            .max_by_key(|rule| rule.path.trim_end_matches('/').len())
    }
}

impl FileServingAuthorizer for MountAuthorizer {
    fn authorized(&self, key: &str, request: &AuthorizationRequest) -> CollaboratorResult<bool> {
        let Some(rule) = self.rule_for(key) else {
            tracing::debug!("No mount rule covers {}", key);
            return Ok(false);
        };
        Ok(rule.decide(request))
    }
}
