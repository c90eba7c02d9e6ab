use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================= BINDING

/// Directive committing a pod to a node.
///
/// Sent once per successful scheduling decision; never retained as state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Binding {
    #[serde(rename = "podName")]
    pub pod_name: String,
    pub namespace: String,
    #[serde(rename = "targetNode")]
    pub target_node: String,
}

// ============================= EVENTS

/// Reference to the object an event is about.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectRef {
    pub kind: String,
    pub name: String,
}

/// Best-effort scheduling telemetry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRequest {
    pub namespace: String,
    #[serde(rename = "involvedObject")]
    pub involved_object: ObjectRef,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
