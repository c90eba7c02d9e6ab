//! Built-in predicates and priorities.
//!
//! Everything here is deterministic for a fixed (node, pod) pair except
//! [`ExplorationPriority`], which is the single sanctioned home for
//! randomness and must never be part of a default composition.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::models::{node::Node, pod::Pod};

use crate::errors::ExtensionError;
use crate::registry::{MAX_EXTENSION_SCORE, Predicate, Priority};

/// Feasible iff every entry of the pod's node selector is present, key and
/// value, in the node's labels. Pods without a selector accept any node.
pub struct NodeSelectorPredicate;

impl Predicate for NodeSelectorPredicate {
    fn name(&self) -> &str {
        "node-selector"
    }

    fn feasible(&self, node: &Node, pod: &Pod) -> Result<bool, ExtensionError> {
        Ok(pod
            .spec
            .node_selector
            .iter()
            .all(|(key, value)| node.labels.get(key) == Some(value)))
    }
}

/// Scores nodes carrying a given label; everything else gets a base of 1.
///
/// Label-driven placement policy, e.g. steering pods onto cheaper
/// preemptible machines.
pub struct LabelPriority {
    key: String,
    value: String,
    score: i64,
}

impl LabelPriority {
    const BASE_SCORE: i64 = 1;

    pub fn new(key: &str, value: &str) -> Self {
        Self::with_score(key, value, MAX_EXTENSION_SCORE)
    }

    pub fn with_score(key: &str, value: &str, score: i64) -> Self {
        LabelPriority {
            key: key.to_string(),
            value: value.to_string(),
            score,
        }
    }
}

impl Priority for LabelPriority {
    fn name(&self) -> &str {
        "label"
    }

    fn score(&self, node: &Node, _pod: &Pod) -> Result<i64, ExtensionError> {
        if node.labels.get(&self.key) == Some(&self.value) {
            Ok(self.score)
        } else {
            Ok(Self::BASE_SCORE)
        }
    }
}

/// Random score in 1..=5 from an explicitly seeded generator.
///
/// Breaks the determinism the engine otherwise requires, so it is opt-in
/// only; a fixed seed gives a reproducible sequence for tests.
pub struct ExplorationPriority {
    rng: Mutex<StdRng>,
}

impl ExplorationPriority {
    pub fn seeded(seed: u64) -> Self {
        ExplorationPriority {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Priority for ExplorationPriority {
    fn name(&self) -> &str {
        "exploration"
    }

    fn score(&self, _node: &Node, _pod: &Pod) -> Result<i64, ExtensionError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ExtensionError::new("exploration rng poisoned"))?;
        Ok(rng.random_range(1..=5))
    }
}
