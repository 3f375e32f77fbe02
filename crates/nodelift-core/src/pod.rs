//! Pending workload units and their derived node requirements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::requirements::{Requirement, Requirements};

/// A unit of workload needing to run on exactly one node.
///
/// Read-only to the scheduling core, except that topology injection may
/// append node-affinity requirements before the grouping pass runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    /// Exact-match node selector: the node label must equal the value.
    #[serde(default)]
    pub node_selector: BTreeMap<String, String>,
    /// Required node-affinity terms, plus any injected topology terms.
    #[serde(default)]
    pub node_affinity: Vec<Requirement>,
}

impl Pod {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            node_selector: BTreeMap::new(),
            node_affinity: Vec::new(),
        }
    }

    /// `{namespace}/{name}`, used in logs.
    pub fn id(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    pub fn with_selector(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.node_selector.insert(key.into(), value.into());
        self
    }

    pub fn with_affinity(mut self, requirement: Requirement) -> Self {
        self.node_affinity.push(requirement);
        self
    }

    /// Append a requirement in place. This is the mutation hook topology
    /// injection uses to turn spread constraints into node selectors.
    pub fn add_requirement(&mut self, requirement: Requirement) {
        self.node_affinity.push(requirement);
    }

    /// This pod's node requirements in the scheduling vocabulary.
    ///
    /// Selector entries become single-value `In` requirements; a key
    /// constrained by both the selector and an affinity term intersects.
    pub fn requirements(&self) -> Requirements {
        let mut requirements = Requirements::new(
            self.node_selector
                .iter()
                .map(|(key, value)| Requirement::in_values(key.clone(), [value.clone()])),
        );
        for term in &self.node_affinity {
            requirements.insert(term.clone());
        }
        requirements
    }
}
