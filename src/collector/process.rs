// Processes: list (fatal), per-process details through a bounded pool, ranked by CPU

use super::{Collector, best_effort};
use crate::context::Context;
use crate::error::CollectError;
use crate::models::{ProcInfo, ProcessBrief, rank_processes};
use crate::probe::SystemProbe;
use futures_util::{StreamExt, future, stream};
use tracing::instrument;

impl<P: SystemProbe> Collector<P> {
    /// Returns the total process count and the `top_n` rows with the highest CPU percent.
    #[instrument(skip(self, ctx), fields(domain = "processes"))]
    pub async fn collect_processes(
        &self,
        ctx: &Context,
        top_n: usize,
    ) -> Result<ProcInfo, CollectError> {
        let pids = self.query(ctx, "pids", |p, c| p.pids(c)).await?;

        let rows: Vec<ProcessBrief> = stream::iter(pids)
            .map(|pid| {
                self.query(ctx, "process_brief", move |p, c| {
                    Ok(process_brief(p, c, pid))
                })
            })
            .buffer_unordered(self.settings.process_concurrency.max(1))
            .filter_map(|row| future::ready(best_effort("process_brief", row)))
            .collect()
            .await;

        // Rows gathered after the context ended are incomplete.
        ctx.check()?;
        tracing::debug!(count = rows.len(), "process rows collected");
        Ok(rank_processes(rows, top_n))
    }
}

/// One row; each field degrades to empty/zero on its own.
fn process_brief<P: SystemProbe + ?Sized>(probe: &P, ctx: &Context, pid: u32) -> ProcessBrief {
    ProcessBrief {
        pid,
        name: best_effort("process_name", probe.process_name(ctx, pid)).unwrap_or_default(),
        exe: best_effort("process_exe", probe.process_exe(ctx, pid)).unwrap_or_default(),
        cmdline: best_effort("process_cmdline", probe.process_cmdline(ctx, pid))
            .unwrap_or_default(),
        username: best_effort("process_username", probe.process_username(ctx, pid))
            .unwrap_or_default(),
        cpu_percent: best_effort("process_cpu_percent", probe.process_cpu_percent(ctx, pid))
            .unwrap_or_default(),
        mem_percent: best_effort(
            "process_memory_percent",
            probe.process_memory_percent(ctx, pid),
        )
        .unwrap_or_default(),
        status: best_effort("process_status", probe.process_status(ctx, pid))
            .unwrap_or_default(),
    }
}
