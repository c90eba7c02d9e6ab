use std::sync::Arc;

use shared::models::{node::Node, pod::Pod};

use crate::errors::{ExtensionError, ScheduleError};

/// Upper bound priorities are expected to stay within, by convention.
pub const MAX_EXTENSION_SCORE: i64 = 100;

/// Boolean feasibility check for a (node, pod) pair.
///
/// Implementations must be pure and deterministic for a fixed input within
/// one scheduling pass. Returning `Err` marks only that node infeasible.
pub trait Predicate: Send + Sync {
    fn name(&self) -> &str;
    fn feasible(&self, node: &Node, pod: &Pod) -> Result<bool, ExtensionError>;
}

/// Numeric desirability score for a (node, pod) pair.
///
/// Scores from every registered priority are summed per node. Same purity
/// requirement as [`Predicate`]; returning `Err` contributes zero.
pub trait Priority: Send + Sync {
    fn name(&self) -> &str;
    fn score(&self, node: &Node, pod: &Pod) -> Result<i64, ExtensionError>;
}

/// Ordered predicate and priority lists owned by one engine instance.
///
/// Built through [`RegistryBuilder`] once at startup and immutable
/// afterwards, so concurrent reads while scheduling need no locking.
/// Insertion order is preserved but only affects short-circuit efficiency:
/// predicate conjunction and priority summation are order-independent.
pub struct Registry {
    predicates: Vec<Arc<dyn Predicate>>,
    priorities: Vec<Arc<dyn Priority>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry with no extensions: every node feasible, every score 0.
    pub fn empty() -> Self {
        Registry {
            predicates: Vec::new(),
            priorities: Vec::new(),
        }
    }

    pub fn predicates(&self) -> &[Arc<dyn Predicate>] {
        &self.predicates
    }

    pub fn priorities(&self) -> &[Arc<dyn Priority>] {
        &self.priorities
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    predicates: Vec<Arc<dyn Predicate>>,
    priorities: Vec<Arc<dyn Priority>>,
}

impl RegistryBuilder {
    /// Appends a predicate. No deduplication.
    pub fn register_predicate(
        mut self,
        predicate: impl Predicate + 'static,
    ) -> Result<Self, ScheduleError> {
        validate_name(predicate.name(), "predicate")?;
        tracing::debug!(predicate = %predicate.name(), "Registered predicate");
        self.predicates.push(Arc::new(predicate));
        Ok(self)
    }

    /// Appends a priority. No deduplication.
    pub fn register_priority(
        mut self,
        priority: impl Priority + 'static,
    ) -> Result<Self, ScheduleError> {
        validate_name(priority.name(), "priority")?;
        tracing::debug!(priority = %priority.name(), "Registered priority");
        self.priorities.push(Arc::new(priority));
        Ok(self)
    }

    /// Freezes the registry. Consuming the builder is what rules out late
    /// registration while scheduling is active.
    pub fn build(self) -> Registry {
        Registry {
            predicates: self.predicates,
            priorities: self.priorities,
        }
    }
}

/// The signature already guarantees the extension is callable with a
/// (node, pod) pair, so the name is the remaining validity surface; it
/// identifies the extension in logs.
fn validate_name(name: &str, kind: &str) -> Result<(), ScheduleError> {
    if name.trim().is_empty() {
        return Err(ScheduleError::InvalidExtension(format!(
            "{} registered without a name",
            kind
        )));
    }
    Ok(())
}

// --- Closure adapters ---

/// Wraps a closure as a named predicate.
pub fn predicate_fn<F>(name: &str, f: F) -> impl Predicate + use<F>
where
    F: Fn(&Node, &Pod) -> bool + Send + Sync,
{
    FnPredicate {
        name: name.to_string(),
        f,
    }
}

/// Wraps a closure as a named priority.
pub fn priority_fn<F>(name: &str, f: F) -> impl Priority + use<F>
where
    F: Fn(&Node, &Pod) -> i64 + Send + Sync,
{
    FnPriority {
        name: name.to_string(),
        f,
    }
}

struct FnPredicate<F> {
    name: String,
    f: F,
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&Node, &Pod) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn feasible(&self, node: &Node, pod: &Pod) -> Result<bool, ExtensionError> {
        Ok((self.f)(node, pod))
    }
}

struct FnPriority<F> {
    name: String,
    f: F,
}

impl<F> Priority for FnPriority<F>
where
    F: Fn(&Node, &Pod) -> i64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, node: &Node, pod: &Pod) -> Result<i64, ExtensionError> {
        Ok((self.f)(node, pod))
    }
}
