use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one engine instance.
///
/// `fallback_selections` is the important one: it makes the
/// schedule-anyway branch visible instead of a silent policy violation.
#[derive(Debug, Default)]
pub struct SchedulerMetrics {
    fallback_selections: AtomicU64,
    pods_bound: AtomicU64,
    pods_already_placed: AtomicU64,
    binding_failures: AtomicU64,
    events_dropped: AtomicU64,
}

impl SchedulerMetrics {
    pub fn fallback_selections(&self) -> u64 {
        self.fallback_selections.load(Ordering::Relaxed)
    }

    pub fn pods_bound(&self) -> u64 {
        self.pods_bound.load(Ordering::Relaxed)
    }

    pub fn pods_already_placed(&self) -> u64 {
        self.pods_already_placed.load(Ordering::Relaxed)
    }

    pub fn binding_failures(&self) -> u64 {
        self.binding_failures.load(Ordering::Relaxed)
    }

    pub fn events_dropped(&self) -> u64 {
        self.events_dropped.load(Ordering::Relaxed)
    }

    pub(crate) fn record_fallback(&self) {
        self.fallback_selections.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_bound(&self) {
        self.pods_bound.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_already_placed(&self) {
        self.pods_already_placed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_binding_failure(&self) {
        self.binding_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_event_dropped(&self) {
        self.events_dropped.fetch_add(1, Ordering::Relaxed);
    }
}
