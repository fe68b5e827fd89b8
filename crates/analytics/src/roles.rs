//! Display roles kept beside the graph
//!
//! The engine never reads these; callers update them after running an
//! algorithm so a display layer can colour nodes.

use crate::citation::CitationGraph;
use crate::expansion::HIndexResult;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    #[default]
    Unselected,
    Seed,
    HCore,
    KCore,
}

/// Article key -> role
#[derive(Debug, Clone, Default)]
pub struct NodeRoles {
    roles: HashMap<String, NodeRole>,
}

impl NodeRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self, id: &str) -> NodeRole {
        self.roles.get(id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: impl Into<String>, role: NodeRole) {
        let id = id.into();
        if role == NodeRole::Unselected {
            self.roles.remove(&id);
        } else {
            self.roles.insert(id, role);
        }
    }

    pub fn clear(&mut self) {
        self.roles.clear();
    }

    /// Keys holding `role`
    pub fn with_role(&self, role: NodeRole) -> impl Iterator<Item = &str> {
        self.roles
            .iter()
            .filter(move |&(_, &r)| r == role)
            .map(|(id, _)| id.as_str())
    }

    /// Highlight the outcome of an expansion: every working node is reset,
    /// then the seed (if present) and its H-core are marked.
    pub fn apply_expansion(&mut self, working: &CitationGraph, seed: &str, result: &HIndexResult) {
        for id in working.node_ids() {
            self.roles.remove(id);
        }

        if working.contains_node(seed) {
            self.set(seed, NodeRole::Seed);
        }

        for id in &result.h_core {
            if working.contains_node(id) {
                self.set(id.as_str(), NodeRole::HCore);
            }
        }
    }

    /// Highlight a k-core; nodes outside it are reset except the seed
    pub fn apply_k_core(&mut self, working: &CitationGraph, core: &HashSet<String>, seed: Option<&str>) {
        for id in working.node_ids() {
            if core.contains(id) {
                self.set(id, NodeRole::KCore);
            } else if Some(id) != seed {
                self.roles.remove(id);
            }
        }
    }
}
