// Background sampler: periodic slow probe with a non-blocking, tear-free snapshot read.

use crate::context::Context;
use crate::error::CollectError;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Running,
    Stopped,
}

/// Point-in-time copy of the sampler's cached triple.
#[derive(Debug, Clone)]
pub struct Sample<T> {
    /// Latest successful value, shared read-only with other readers.
    pub value: Option<Arc<T>>,
    /// When the pass that produced `value` started (or the failed attempt, if no value yet).
    pub at: DateTime<Utc>,
    /// Error of the most recent attempt; `None` after a success.
    pub error: Option<CollectError>,
}

struct Slot<T> {
    value: Option<Arc<T>>,
    at: DateTime<Utc>,
    error: Option<CollectError>,
}

/// Owns one background task that refreshes a cached value every `every`.
///
/// Only the task writes the slot (first sample included), always as a single critical
/// section, so readers never see a value paired with another pass's timestamp or error.
/// Dropping the sampler aborts the task.
pub struct Sampler<T> {
    slot: Arc<RwLock<Slot<T>>>,
    task: JoinHandle<()>,
}

impl<T: Send + Sync + 'static> Sampler<T> {
    /// Takes the first sample before returning, then keeps sampling until `token` is cancelled.
    /// A zero `every` is raised to one millisecond.
    pub async fn start<F, Fut>(token: CancellationToken, every: Duration, mut probe: F) -> Self
    where
        F: FnMut(Context) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, CollectError>> + Send + 'static,
    {
        let every = every.max(MIN_INTERVAL);
        let ctx = Context::from_token(token.clone());
        let slot = Arc::new(RwLock::new(Slot {
            value: None,
            at: Utc::now(),
            error: None,
        }));

        let (first_done, first_ready) = oneshot::channel();
        let writer = slot.clone();
        let task = tokio::spawn(async move {
            let started = Utc::now();
            let first = probe(ctx.clone()).await;
            publish(&writer, started, first);
            let _ = first_done.send(());

            let mut tick = interval_at(Instant::now() + every, every);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = tick.tick() => {
                        let started = Utc::now();
                        let outcome = tokio::select! {
                            biased;
                            _ = token.cancelled() => break,
                            outcome = probe(ctx.clone()) => outcome,
                        };
                        publish(&writer, started, outcome);
                    }
                }
            }
            tracing::debug!("sampler stopped");
        });
        // Err only if the task died during the first pass; the slot then stays empty.
        if first_ready.await.is_err() {
            tracing::warn!("sampler task ended before its first sample");
        }

        Self { slot, task }
    }

    /// Copies out the latest completed sample. Never waits on an in-progress pass.
    pub fn snapshot(&self) -> Sample<T> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        Sample {
            value: slot.value.clone(),
            at: slot.at,
            error: slot.error.clone(),
        }
    }

    /// Whether the background task is still alive. Diagnostic only; never blocks.
    pub fn state(&self) -> SamplerState {
        if self.task.is_finished() {
            SamplerState::Stopped
        } else {
            SamplerState::Running
        }
    }
}

impl<T> Drop for Sampler<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Success replaces value and timestamp and clears the error; failure only records the error,
/// keeping the previous value with its own timestamp.
fn publish<T>(slot: &RwLock<Slot<T>>, started: DateTime<Utc>, outcome: Result<T, CollectError>) {
    match &outcome {
        Err(e) if e.is_context() => tracing::debug!(error = %e, "sample interrupted"),
        Err(e) => tracing::warn!(error = %e, "sample failed; keeping previous value"),
        Ok(_) => {}
    }
    let mut slot = slot.write().unwrap_or_else(PoisonError::into_inner);
    match outcome {
        Ok(value) => {
            slot.value = Some(Arc::new(value));
            slot.at = started;
            slot.error = None;
        }
        Err(e) => {
            if slot.value.is_none() {
                slot.at = started;
            }
            slot.error = Some(e);
        }
    }
}
