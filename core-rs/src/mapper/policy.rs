// policy.rs - When a record value becomes a link instead of a literal

use oxigraph::model::NamedNode;
use serde::{Deserialize, Serialize};

/// Decides whether a creator (or source) value is an identifier.
///
/// A value is linked when it starts with one of `link_prefixes` and is a
/// valid absolute IRI; anything else is written as a plain literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorPolicy {
    #[serde(default = "default_link_prefixes")]
    pub link_prefixes: Vec<String>,
}

fn default_link_prefixes() -> Vec<String> {
    vec!["http://".to_string(), "https://".to_string(), "urn:".to_string()]
}

impl Default for CreatorPolicy {
    fn default() -> Self {
        Self {
            link_prefixes: default_link_prefixes(),
        }
    }
}

impl CreatorPolicy {
    pub fn new(link_prefixes: Vec<String>) -> Self {
        Self { link_prefixes }
    }

    /// The value as an IRI, if the policy treats it as one.
    pub fn link_for(&self, value: &str) -> Option<NamedNode> {
        let value = value.trim();
        let lowered = value.to_ascii_lowercase();
        if !self.link_prefixes.iter().any(|p| lowered.starts_with(&p.to_ascii_lowercase())) {
            return None;
        }
        NamedNode::new(value).ok()
    }
}
