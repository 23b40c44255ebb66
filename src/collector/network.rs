// Network: interfaces and counters (fatal), connections on request (best-effort)

use super::{Collector, best_effort};
use crate::context::Context;
use crate::error::CollectError;
use crate::models::NetInfo;
use crate::probe::SystemProbe;
use tracing::instrument;

impl<P: SystemProbe> Collector<P> {
    /// Socket listing can be slow or need privileges; when it fails the field is omitted.
    #[instrument(skip(self, ctx), fields(domain = "net"))]
    pub async fn collect_net(
        &self,
        ctx: &Context,
        include_connections: bool,
    ) -> Result<NetInfo, CollectError> {
        let interfaces = self
            .query(ctx, "net_interfaces", |p, c| p.net_interfaces(c))
            .await?;
        let io_counters = self
            .query(ctx, "net_io_counters", |p, c| p.net_io_counters(c))
            .await?;

        let connections = if include_connections {
            let conns = self
                .query(ctx, "net_connections", |p, c| p.net_connections(c))
                .await;
            best_effort("net_connections", conns)
        } else {
            None
        };

        Ok(NetInfo {
            interfaces,
            io_counters,
            connections,
        })
    }
}
