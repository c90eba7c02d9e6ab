use async_trait::async_trait;
use reqwest::Client;
use shared::api::{Binding, EventRequest};
use shared::models::{node::Node, pod::Pod};

use crate::errors::ClusterError;

/// Narrow interface to the cluster API server.
///
/// Everything the engine needs from the outside world. Binding creation is
/// the engine's sole effectful call besides best-effort event emission.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Full node inventory, readiness not yet filtered.
    async fn list_nodes(&self) -> Result<Vec<Node>, ClusterError>;

    /// Pods, optionally restricted to one namespace.
    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>, ClusterError>;

    async fn create_binding(&self, binding: &Binding) -> Result<(), ClusterError>;

    /// Best-effort; callers must tolerate failure.
    async fn create_event(&self, event: &EventRequest) -> Result<(), ClusterError>;
}

/// HTTP implementation speaking JSON to the API server.
pub struct HttpCluster {
    client: Client,
    base_url: String,
}

impl HttpCluster {
    pub fn new(base_url: &str) -> Self {
        HttpCluster {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ClusterError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ClusterError::Status(resp.status().as_u16()));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ClusterError::Decode(e.to_string()))
    }

    async fn post_json<T: serde::Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<(), ClusterError> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ClusterError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl ClusterClient for HttpCluster {
    async fn list_nodes(&self) -> Result<Vec<Node>, ClusterError> {
        self.get_json(&format!("{}/nodes", self.base_url)).await
    }

    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>, ClusterError> {
        let url = match namespace {
            Some(ns) => format!("{}/pods?namespace={}", self.base_url, ns),
            None => format!("{}/pods", self.base_url),
        };
        self.get_json(&url).await
    }

    async fn create_binding(&self, binding: &Binding) -> Result<(), ClusterError> {
        self.post_json(&format!("{}/bindings", self.base_url), binding)
            .await
    }

    async fn create_event(&self, event: &EventRequest) -> Result<(), ClusterError> {
        self.post_json(&format!("{}/events", self.base_url), event)
            .await
    }
}
