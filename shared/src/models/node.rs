use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a node in the cluster.
///
/// Snapshots handed to the scheduler are immutable; the engine never
/// writes back to a node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Node {
    pub id: Uuid,
    pub name: String,
    pub labels: HashMap<String, String>,
    pub conditions: Vec<NodeCondition>,
    pub started_at: DateTime<Utc>,
}

/// One entry of a node's reported health state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeCondition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub status: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ConditionType {
    Ready,
    MemoryPressure,
    DiskPressure,
    NetworkUnavailable,
}

impl Node {
    /// True when the node reports a `Ready` condition with status true.
    pub fn is_ready(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| c.condition_type == ConditionType::Ready && c.status)
    }
}

impl Default for Node {
    fn default() -> Self {
        let id = Uuid::new_v4();
        Node {
            id,
            name: id.to_string(),
            labels: HashMap::new(),
            conditions: vec![NodeCondition {
                condition_type: ConditionType::Ready,
                status: true,
            }],
            started_at: Utc::now(),
        }
    }
}
