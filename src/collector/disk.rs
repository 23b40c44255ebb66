// Disk: partitions (fatal), then per-mount usage (best-effort) alongside I/O counters (fatal)

use super::{Collector, best_effort};
use crate::context::Context;
use crate::error::CollectError;
use crate::models::DiskInfo;
use crate::probe::SystemProbe;
use futures_util::future;
use tracing::instrument;

impl<P: SystemProbe> Collector<P> {
    #[instrument(skip_all, fields(domain = "disk"))]
    pub async fn collect_disk(&self, ctx: &Context) -> Result<DiskInfo, CollectError> {
        let partitions = self
            .query(ctx, "partitions", |p, c| p.partitions(c))
            .await?;

        let usage_queries = partitions.iter().map(|part| {
            let mountpoint = part.mountpoint.clone();
            async move {
                let path = mountpoint.clone();
                let usage = self
                    .query(ctx, "disk_usage", move |p, c| p.disk_usage(c, &path))
                    .await;
                best_effort("disk_usage", usage).map(|u| (mountpoint, u))
            }
        });

        let (usage, io_counters) = tokio::join!(
            future::join_all(usage_queries),
            self.query(ctx, "disk_io_counters", |p, c| p.disk_io_counters(c)),
        );

        Ok(DiskInfo {
            partitions,
            usage: usage.into_iter().flatten().collect(),
            io_counters: io_counters?,
        })
    }
}
