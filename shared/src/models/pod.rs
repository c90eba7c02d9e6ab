use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::metadata::Metadata;

// --- Core ---

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Pod {
    pub metadata: Metadata,
    pub spec: PodSpec,
    pub status: PodStatus,
}

/// Desired state
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PodSpec {
    /// Current placement; `None` while the pod is unbound.
    #[serde(rename = "nodeName")]
    pub node_name: Option<String>,
    /// Labels a node must carry for the selector predicate to accept it.
    /// Opaque to the rest of the engine.
    #[serde(rename = "nodeSelector", default)]
    pub node_selector: HashMap<String, String>,
}

/// Actual state
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PodStatus {
    pub phase: PodPhase,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum PodPhase {
    Pending,
    Running,
    Unknown,
    Failed,
    Succeeded,
}

// --- Impl ---

impl Pod {
    /// Whether the pod already sits on the given node.
    pub fn is_placed_on(&self, node_name: &str) -> bool {
        self.spec.node_name.as_deref() == Some(node_name)
    }
}

impl Default for PodStatus {
    fn default() -> Self {
        PodStatus {
            phase: PodPhase::Pending,
            last_update: None,
        }
    }
}
