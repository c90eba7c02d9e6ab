use tokio_util::sync::CancellationToken;

use crate::cluster::ClusterClient;
use crate::engine::{Engine, Placement, list_ready_nodes};
use crate::errors::{ClusterError, ScheduleError};

/// Namespace whose pods the driver never touches.
pub const SYSTEM_NAMESPACE: &str = "kube-system";

/// One reconciliation pass: list nodes and pods through the collaborator,
/// reduce to ready nodes, and run every pod through the engine.
///
/// A single pod's failure never halts the pass; only listing failures and
/// cancellation stop it. Polling cadence and process bootstrap belong to
/// the caller.
pub async fn run_once<C: ClusterClient>(
    engine: &Engine<C>,
    namespace: Option<&str>,
    cancel: &CancellationToken,
) -> Result<(), ClusterError> {
    let nodes = engine.cluster().list_nodes().await?;
    let ready = list_ready_nodes(&nodes);
    let pods = engine.cluster().list_pods(namespace).await?;

    tracing::debug!(
        nodes = nodes.len(),
        ready = ready.len(),
        pods = pods.len(),
        "Starting scheduling pass"
    );

    for pod in pods {
        if cancel.is_cancelled() {
            tracing::debug!("Pass cancelled between pods");
            return Ok(());
        }
        if pod.metadata.namespace == SYSTEM_NAMESPACE {
            continue;
        }

        match engine.schedule_pod_on_best_node(&pod, &ready, cancel).await {
            Ok(Placement::Bound(node)) => {
                tracing::debug!(pod = %pod.metadata.name, %node, "Bound");
            }
            Ok(Placement::AlreadyPlaced(_)) => {}
            Ok(Placement::NoCandidates) => {
                tracing::warn!(pod = %pod.metadata.name, "No ready nodes, leaving pod pending");
            }
            Err(ScheduleError::Cancelled) => {
                tracing::debug!(pod = %pod.metadata.name, "Pass cancelled mid-attempt");
                return Ok(());
            }
            Err(err) => {
                // Keep going, the next pod may still schedule
                tracing::error!(pod = %pod.metadata.name, %err, "Failed to schedule pod");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::testutil::{MockCluster, node, placed_pod, pod};

    #[tokio::test]
    async fn test_pass_schedules_every_pending_pod() {
        let cluster = MockCluster {
            nodes: vec![node("a", true), node("b", false)],
            pods: vec![pod("web"), pod("db")],
            ..Default::default()
        };
        let engine = Engine::new(Registry::empty(), cluster);

        run_once(&engine, None, &CancellationToken::new())
            .await
            .unwrap();

        let bindings = engine.cluster().bound();
        assert_eq!(bindings.len(), 2);
        // Only the ready node is ever chosen
        assert!(bindings.iter().all(|b| b.target_node == "a"));
    }

    #[tokio::test]
    async fn test_one_failing_pod_does_not_halt_the_pass() {
        let cluster = MockCluster {
            nodes: vec![node("a", true)],
            pods: vec![pod("doomed"), pod("web")],
            fail_bind_for: Some("doomed".to_string()),
            ..Default::default()
        };
        let engine = Engine::new(Registry::empty(), cluster);

        run_once(&engine, None, &CancellationToken::new())
            .await
            .unwrap();

        let bindings = engine.cluster().bound();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].pod_name, "web");
        assert_eq!(engine.metrics().binding_failures(), 1);
    }

    #[tokio::test]
    async fn test_system_namespace_is_skipped() {
        let mut system_pod = pod("coredns");
        system_pod.metadata.namespace = SYSTEM_NAMESPACE.to_string();

        let cluster = MockCluster {
            nodes: vec![node("a", true)],
            pods: vec![system_pod, pod("web")],
            ..Default::default()
        };
        let engine = Engine::new(Registry::empty(), cluster);

        run_once(&engine, None, &CancellationToken::new())
            .await
            .unwrap();

        let bindings = engine.cluster().bound();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].pod_name, "web");
    }

    #[tokio::test]
    async fn test_placed_pods_are_left_alone() {
        let cluster = MockCluster {
            nodes: vec![node("a", true)],
            pods: vec![placed_pod("web", "a")],
            ..Default::default()
        };
        let engine = Engine::new(Registry::empty(), cluster);

        run_once(&engine, None, &CancellationToken::new())
            .await
            .unwrap();
        assert!(engine.cluster().bound().is_empty());
        assert_eq!(engine.metrics().pods_already_placed(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_pass_stops_before_binding() {
        let cluster = MockCluster {
            nodes: vec![node("a", true)],
            pods: vec![pod("web")],
            ..Default::default()
        };
        let engine = Engine::new(Registry::empty(), cluster);

        let cancel = CancellationToken::new();
        cancel.cancel();

        run_once(&engine, None, &cancel).await.unwrap();
        assert!(engine.cluster().bound().is_empty());
    }
}
