// CPU: info, instantaneous per-core percent and per-core times, all load-bearing

use super::Collector;
use crate::context::Context;
use crate::error::CollectError;
use crate::models::CpuInfo;
use crate::probe::SystemProbe;
use tracing::instrument;

impl<P: SystemProbe> Collector<P> {
    #[instrument(skip_all, fields(domain = "cpu"))]
    pub async fn collect_cpu(&self, ctx: &Context) -> Result<CpuInfo, CollectError> {
        let (info, percent, times) = tokio::join!(
            self.query(ctx, "cpu_info", |p, c| p.cpu_info(c)),
            self.query(ctx, "cpu_percent", |p, c| p.cpu_percent(c)),
            self.query(ctx, "cpu_times", |p, c| p.cpu_times(c)),
        );
        Ok(CpuInfo {
            info: info?,
            percent: percent?,
            times: times?,
        })
    }
}
