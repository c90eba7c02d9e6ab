//! Fixtures shared by the engine and driver test modules.

use std::sync::Mutex;

use async_trait::async_trait;
use shared::api::{Binding, EventRequest};
use shared::models::node::{ConditionType, Node, NodeCondition};
use shared::models::pod::Pod;

use crate::cluster::ClusterClient;
use crate::errors::ClusterError;

pub fn node(name: &str, ready: bool) -> Node {
    let mut node = Node::default();
    node.name = name.to_string();
    node.conditions = vec![NodeCondition {
        condition_type: ConditionType::Ready,
        status: ready,
    }];
    node
}

pub fn labeled_node(name: &str, key: &str, value: &str) -> Node {
    let mut node = node(name, true);
    node.labels.insert(key.to_string(), value.to_string());
    node
}

pub fn pod(name: &str) -> Pod {
    let mut pod = Pod::default();
    pod.metadata.name = name.to_string();
    pod
}

pub fn placed_pod(name: &str, node_name: &str) -> Pod {
    let mut pod = pod(name);
    pod.spec.node_name = Some(node_name.to_string());
    pod
}

/// In-memory collaborator recording every binding and event it receives.
#[derive(Default)]
pub struct MockCluster {
    pub nodes: Vec<Node>,
    pub pods: Vec<Pod>,
    pub bindings: Mutex<Vec<Binding>>,
    pub events: Mutex<Vec<EventRequest>>,
    /// Pod name whose binding request is rejected.
    pub fail_bind_for: Option<String>,
    pub fail_events: bool,
}

impl MockCluster {
    pub fn bound(&self) -> Vec<Binding> {
        self.bindings.lock().unwrap().clone()
    }

    pub fn emitted(&self) -> Vec<EventRequest> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClusterClient for MockCluster {
    async fn list_nodes(&self) -> Result<Vec<Node>, ClusterError> {
        Ok(self.nodes.clone())
    }

    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>, ClusterError> {
        Ok(self
            .pods
            .iter()
            .filter(|p| namespace.is_none_or(|ns| p.metadata.namespace == ns))
            .cloned()
            .collect())
    }

    async fn create_binding(&self, binding: &Binding) -> Result<(), ClusterError> {
        if self.fail_bind_for.as_deref() == Some(binding.pod_name.as_str()) {
            return Err(ClusterError::Status(500));
        }
        self.bindings.lock().unwrap().push(binding.clone());
        Ok(())
    }

    async fn create_event(&self, event: &EventRequest) -> Result<(), ClusterError> {
        if self.fail_events {
            return Err(ClusterError::Status(503));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
