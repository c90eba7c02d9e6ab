use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use shared::api::{Binding, EventRequest, ObjectRef};
use shared::models::{node::Node, pod::Pod};

use crate::cluster::ClusterClient;
use crate::errors::ScheduleError;
use crate::metrics::SchedulerMetrics;
use crate::registry::Registry;

/// Outcome of one scheduling attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// A binding for the named node was committed.
    Bound(String),
    /// The pod already sits on the chosen node; no binding issued.
    AlreadyPlaced(String),
    /// The candidate list was empty; nothing to choose from. Not an error,
    /// the pod stays pending until the caller retries with nodes.
    NoCandidates,
}

/// Nodes reporting a true `Ready` condition, relative order preserved.
/// An empty result is not an error.
pub fn list_ready_nodes(all_nodes: &[Node]) -> Vec<Node> {
    all_nodes.iter().filter(|n| n.is_ready()).cloned().collect()
}

/// Drives the filter→score→select→bind pipeline for single pods.
///
/// Stateless across calls apart from metrics counters, so one engine can
/// serve many pods concurrently as long as each decision gets its own
/// immutable node snapshot.
pub struct Engine<C> {
    registry: Arc<Registry>,
    cluster: C,
    metrics: SchedulerMetrics,
}

impl<C: ClusterClient> Engine<C> {
    pub fn new(registry: Registry, cluster: C) -> Self {
        Engine {
            registry: Arc::new(registry),
            cluster,
            metrics: SchedulerMetrics::default(),
        }
    }

    pub fn cluster(&self) -> &C {
        &self.cluster
    }

    pub fn metrics(&self) -> &SchedulerMetrics {
        &self.metrics
    }

    /// True iff every registered predicate accepts the (node, pod) pair.
    ///
    /// Short-circuits on the first rejection. Zero predicates accept every
    /// node. A failing predicate rejects only this node.
    pub fn apply_predicates(&self, node: &Node, pod: &Pod) -> bool {
        for predicate in self.registry.predicates() {
            match predicate.feasible(node, pod) {
                Ok(true) => {}
                Ok(false) => return false,
                Err(err) => {
                    tracing::warn!(
                        predicate = %predicate.name(),
                        node = %node.name,
                        %err,
                        "Predicate evaluation failed, treating node as infeasible"
                    );
                    return false;
                }
            }
        }
        true
    }

    /// Order-preserving subset of `nodes` passing every predicate.
    pub fn filter_nodes(&self, nodes: &[Node], pod: &Pod) -> Vec<Node> {
        nodes
            .iter()
            .filter(|node| self.apply_predicates(node, pod))
            .cloned()
            .collect()
    }

    /// Sum of every registered priority for the (node, pod) pair.
    ///
    /// Zero priorities score 0. A failing priority contributes 0 for this
    /// node instead of aborting the pass.
    pub fn score_node(&self, node: &Node, pod: &Pod) -> i64 {
        let mut total = 0;
        for priority in self.registry.priorities() {
            match priority.score(node, pod) {
                Ok(score) => total += score,
                Err(err) => {
                    tracing::warn!(
                        priority = %priority.name(),
                        node = %node.name,
                        %err,
                        "Priority evaluation failed, contributing 0"
                    );
                }
            }
        }
        total
    }

    /// Nodes ordered by descending score, ties broken by name ascending so
    /// ranking is a strict total order.
    pub fn rank_nodes(&self, nodes: &[Node], pod: &Pod) -> Vec<Node> {
        let mut scored: Vec<(i64, Node)> = nodes
            .iter()
            .map(|node| (self.score_node(node, pod), node.clone()))
            .collect();
        scored.sort_by(|(score_a, node_a), (score_b, node_b)| {
            score_b
                .cmp(score_a)
                .then_with(|| node_a.name.cmp(&node_b.name))
        });
        scored.into_iter().map(|(_, node)| node).collect()
    }

    /// Best node for the pod, or `None` when `nodes` is empty.
    ///
    /// When no node passes every predicate, the unfiltered candidate list
    /// is ranked instead: schedule anyway, best-effort. That branch
    /// knowingly violates predicate constraints, so it is logged and
    /// counted rather than taken silently.
    pub fn choose_best_node(&self, pod: &Pod, nodes: &[Node]) -> Option<Node> {
        let feasible = self.filter_nodes(nodes, pod);
        let ranked = if feasible.is_empty() {
            if nodes.is_empty() {
                return None;
            }
            self.metrics.record_fallback();
            tracing::warn!(
                pod = %pod.metadata.name,
                candidates = nodes.len(),
                "No node passed every predicate, falling back to unfiltered candidates"
            );
            self.rank_nodes(nodes, pod)
        } else {
            self.rank_nodes(&feasible, pod)
        };
        ranked.into_iter().next()
    }

    /// Full pipeline for one pod against one node snapshot.
    ///
    /// Issues a binding only when the choice differs from the pod's current
    /// placement; repeated calls with an unchanged snapshot and a correctly
    /// placed pod perform no action.
    pub async fn schedule_pod_on_best_node(
        &self,
        pod: &Pod,
        nodes: &[Node],
        cancel: &CancellationToken,
    ) -> Result<Placement, ScheduleError> {
        let Some(best) = self.choose_best_node(pod, nodes) else {
            return Ok(Placement::NoCandidates);
        };

        if pod.is_placed_on(&best.name) {
            self.metrics.record_already_placed();
            tracing::debug!(pod = %pod.metadata.name, node = %best.name, "Already placed");
            return Ok(Placement::AlreadyPlaced(best.name));
        }

        self.bind(pod, &best.name, cancel).await?;
        self.emit_scheduling_event(pod, &best.name, cancel).await;
        Ok(Placement::Bound(best.name))
    }

    /// Commits the binding through the collaborator.
    ///
    /// Checks cancellation before and during the call; a cancelled attempt
    /// reports `Cancelled` and commits nothing.
    pub async fn bind(
        &self,
        pod: &Pod,
        node_name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ScheduleError> {
        if cancel.is_cancelled() {
            return Err(ScheduleError::Cancelled);
        }

        let binding = Binding {
            pod_name: pod.metadata.name.clone(),
            namespace: pod.metadata.namespace.clone(),
            target_node: node_name.to_string(),
        };

        let result = tokio::select! {
            _ = cancel.cancelled() => return Err(ScheduleError::Cancelled),
            res = self.cluster.create_binding(&binding) => res,
        };

        match result {
            Ok(()) => {
                self.metrics.record_bound();
                tracing::info!(pod = %pod.metadata.name, node = %node_name, "Scheduled");
                Ok(())
            }
            Err(err) => {
                self.metrics.record_binding_failure();
                Err(ScheduleError::BindingFailed(err.to_string()))
            }
        }
    }

    /// Best-effort telemetry after a successful bind. Failures are logged
    /// and swallowed; they can never fail the scheduling operation.
    pub async fn emit_scheduling_event(
        &self,
        pod: &Pod,
        node_name: &str,
        cancel: &CancellationToken,
    ) {
        let event = EventRequest {
            namespace: pod.metadata.namespace.clone(),
            involved_object: ObjectRef {
                kind: "Pod".to_string(),
                name: pod.metadata.name.clone(),
            },
            message: format!("Scheduled on {}", node_name),
            timestamp: Utc::now(),
        };

        tokio::select! {
            _ = cancel.cancelled() => {
                self.metrics.record_event_dropped();
                tracing::debug!(pod = %pod.metadata.name, "Cancelled before event emission");
            }
            res = self.cluster.create_event(&event) => {
                if let Err(err) = res {
                    self.metrics.record_event_dropped();
                    tracing::warn!(pod = %pod.metadata.name, %err, "Failed to emit scheduling event");
                }
            }
        }
    }
}
