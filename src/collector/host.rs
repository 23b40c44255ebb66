// Host: identity (fatal) plus temperature sensors (best-effort)

use super::{Collector, best_effort};
use crate::context::Context;
use crate::error::CollectError;
use crate::models::HostInfo;
use crate::probe::SystemProbe;
use tracing::instrument;

impl<P: SystemProbe> Collector<P> {
    #[instrument(skip_all, fields(domain = "host"))]
    pub async fn collect_host(&self, ctx: &Context) -> Result<HostInfo, CollectError> {
        let info = self.query(ctx, "host_info", |p, c| p.host_info(c)).await?;
        let sensors = self
            .query(ctx, "temperatures", |p, c| p.temperatures(c))
            .await;
        Ok(HostInfo {
            info,
            sensors: best_effort("temperatures", sensors).unwrap_or_default(),
        })
    }
}
