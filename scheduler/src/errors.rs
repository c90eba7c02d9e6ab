use std::fmt;

/// Represents errors surfaced by the scheduling engine.
#[derive(Debug)]
pub enum ScheduleError {
    /// A malformed predicate or priority was registered. Fatal at startup.
    InvalidExtension(String),
    /// The collaborator rejected or could not perform the binding.
    /// Surfaced to the caller, never retried internally.
    BindingFailed(String),
    /// The caller cancelled the attempt before a binding was committed.
    Cancelled,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidExtension(msg) => write!(f, "Invalid extension: {}", msg),
            ScheduleError::BindingFailed(msg) => write!(f, "Binding failed: {}", msg),
            ScheduleError::Cancelled => write!(f, "Scheduling attempt cancelled"),
        }
    }
}

impl From<ClusterError> for ScheduleError {
    fn from(err: ClusterError) -> Self {
        ScheduleError::BindingFailed(err.to_string())
    }
}

/// Represents errors from the cluster collaborator.
#[derive(Debug)]
pub enum ClusterError {
    /// Transport level failure reaching the API server.
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
    /// Response body could not be decoded.
    Decode(String),
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ClusterError::Status(code) => write!(f, "Unexpected status: {}", code),
            ClusterError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

/// Failure inside a predicate or priority.
///
/// Aborts only the evaluation of the node it occurred on; the node is
/// treated as infeasible (predicates) or scored zero (priorities).
#[derive(Debug)]
pub struct ExtensionError(String);

impl ExtensionError {
    pub fn new(msg: impl Into<String>) -> Self {
        ExtensionError(msg.into())
    }
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
