// Probe, collector and aggregate error types

use std::fmt;

/// Failure of a single OS-probe call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProbeError {
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
    #[error("{0} not available")]
    NotFound(String),
    #[error("process {0} not found")]
    NoSuchProcess(u32),
    #[error("read {path}: {message}")]
    Io { path: String, message: String },
    #[error("parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("probe canceled")]
    Canceled,
    #[error("probe lock poisoned: {0}")]
    Poisoned(String),
}

pub type ProbeResult<T> = Result<T, ProbeError>;

/// Failure of a collector call. Cheap to clone so the sampler can hand copies to readers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectError {
    #[error("context canceled")]
    Canceled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
    #[error("{operation}: {source}")]
    Probe {
        operation: &'static str,
        #[source]
        source: ProbeError,
    },
    #[error("{operation}: blocking task failed: {message}")]
    Join {
        operation: &'static str,
        message: String,
    },
}

impl CollectError {
    /// True for errors caused by the context ending rather than by a probe.
    pub fn is_context(&self) -> bool {
        matches!(self, CollectError::Canceled | CollectError::DeadlineExceeded)
    }
}

/// One telemetry category. `PRIORITY` is the order used to pick the aggregate's first error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Cpu,
    Mem,
    Disk,
    Net,
    Host,
    Processes,
}

impl Domain {
    pub const PRIORITY: [Domain; 6] = [
        Domain::Cpu,
        Domain::Mem,
        Domain::Disk,
        Domain::Net,
        Domain::Host,
        Domain::Processes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Cpu => "cpu",
            Domain::Mem => "mem",
            Domain::Disk => "disk",
            Domain::Net => "net",
            Domain::Host => "host",
            Domain::Processes => "processes",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain that degraded inside an aggregate collection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{domain}: {source}")]
pub struct DomainError {
    pub domain: Domain,
    #[source]
    pub source: CollectError,
}
