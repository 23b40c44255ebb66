// Memory: virtual then swap, either failure fatal

use super::Collector;
use crate::context::Context;
use crate::error::CollectError;
use crate::models::MemInfo;
use crate::probe::SystemProbe;
use tracing::instrument;

impl<P: SystemProbe> Collector<P> {
    #[instrument(skip_all, fields(domain = "mem"))]
    pub async fn collect_mem(&self, ctx: &Context) -> Result<MemInfo, CollectError> {
        let virtual_memory = self
            .query(ctx, "virtual_memory", |p, c| p.virtual_memory(c))
            .await?;
        let swap = self
            .query(ctx, "swap_memory", |p, c| p.swap_memory(c))
            .await?;
        Ok(MemInfo {
            virtual_memory,
            swap,
        })
    }
}
