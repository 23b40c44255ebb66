// Aggregate: every domain concurrently under one deadline, first error by fixed priority

use super::Collector;
use crate::context::Context;
use crate::error::{CollectError, Domain, DomainError};
use crate::models::Snapshot;
use crate::probe::SystemProbe;
use tracing::instrument;

impl<P: SystemProbe> Collector<P> {
    /// Collects all six domains within `aggregate_timeout` of the call.
    ///
    /// The snapshot holds whatever succeeded. The error, if any, belongs to the first failed
    /// domain in [`Domain::PRIORITY`] order and means "degraded", not "empty": check which
    /// snapshot fields are `None`. Network runs without connections here.
    #[instrument(skip_all, fields(domain = "all"))]
    pub async fn collect_all(&self, parent: Option<&Context>) -> (Snapshot, Option<DomainError>) {
        let ctx = match parent {
            Some(parent) => parent.with_timeout(self.settings.aggregate_timeout),
            None => Context::background().with_timeout(self.settings.aggregate_timeout),
        };
        let _cancel = ctx.cancel_on_drop();

        let (cpu, mem, disk, net, host, procs) = tokio::join!(
            self.collect_cpu(&ctx),
            self.collect_mem(&ctx),
            self.collect_disk(&ctx),
            self.collect_net(&ctx, false),
            self.collect_host(&ctx),
            self.collect_processes(&ctx, self.settings.aggregate_top_n),
        );

        let error = first_error([
            cpu.as_ref().err(),
            mem.as_ref().err(),
            disk.as_ref().err(),
            net.as_ref().err(),
            host.as_ref().err(),
            procs.as_ref().err(),
        ]);
        if let Some(e) = &error {
            tracing::warn!(domain = %e.domain, error = %e.source, "aggregate collection degraded");
        }

        let snapshot = Snapshot {
            cpu: cpu.ok(),
            mem: mem.ok(),
            disk: disk.ok(),
            net: net.ok(),
            host: host.ok(),
            procs: procs.ok(),
        };
        (snapshot, error)
    }
}

/// Picks the first error walking `errors` alongside [`Domain::PRIORITY`].
pub fn first_error(errors: [Option<&CollectError>; 6]) -> Option<DomainError> {
    Domain::PRIORITY
        .into_iter()
        .zip(errors)
        .find_map(|(domain, err)| {
            err.map(|e| DomainError {
                domain,
                source: e.clone(),
            })
        })
}
