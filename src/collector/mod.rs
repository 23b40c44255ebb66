// Domain collectors: concurrent probe queries merged into one result per domain

mod aggregate;
mod cpu;
mod disk;
mod hash;
mod host;
mod memory;
mod network;
mod process;

pub use aggregate::first_error;

use crate::context::Context;
use crate::error::{CollectError, ProbeError, ProbeResult};
use crate::probe::SystemProbe;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

/// Tunables shared by all collectors.
#[derive(Debug, Clone)]
pub struct CollectorSettings {
    /// Absolute budget for one aggregate pass.
    pub aggregate_timeout: Duration,
    /// Process rows kept inside an aggregate snapshot.
    pub aggregate_top_n: usize,
    /// Upper bound on concurrent per-process queries.
    pub process_concurrency: usize,
    /// SHA-256 iterations per entropy hash sample.
    pub hash_rounds: u32,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            aggregate_timeout: Duration::from_secs(3),
            aggregate_top_n: 15,
            process_concurrency: 32,
            hash_rounds: 100_000,
        }
    }
}

/// Runs probe queries off the async executor and assembles domain results.
/// Holds no mutable state; clones share the probe.
pub struct Collector<P> {
    probe: Arc<P>,
    settings: CollectorSettings,
}

impl<P> Clone for Collector<P> {
    fn clone(&self) -> Self {
        Self {
            probe: self.probe.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<P: SystemProbe> Collector<P> {
    pub fn new(probe: Arc<P>, settings: CollectorSettings) -> Self {
        Self { probe, settings }
    }

    pub fn settings(&self) -> &CollectorSettings {
        &self.settings
    }

    /// Runs one blocking probe call on the blocking pool, racing it against `ctx`.
    /// A probe that outlives the context is left to finish detached.
    async fn query<T, F>(
        &self,
        ctx: &Context,
        operation: &'static str,
        f: F,
    ) -> Result<T, CollectError>
    where
        T: Send + 'static,
        F: FnOnce(&P, &Context) -> ProbeResult<T> + Send + 'static,
    {
        ctx.check()?;
        let probe = self.probe.clone();
        let task_ctx = ctx.clone();
        let task = tokio::task::spawn_blocking(move || f(&probe, &task_ctx));
        tokio::select! {
            joined = task => match joined {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(ProbeError::Canceled)) => Err(ctx.err().unwrap_or(CollectError::Canceled)),
                Ok(Err(source)) => Err(CollectError::Probe { operation, source }),
                Err(e) => Err(CollectError::Join {
                    operation,
                    message: e.to_string(),
                }),
            },
            reason = ctx.done() => Err(reason),
        }
    }
}

/// Degrades a failed optional query to `None`, logging instead of propagating.
pub(crate) fn best_effort<T, E: Display>(operation: &'static str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, operation, "best-effort query degraded");
            None
        }
    }
}
