// Entropy hash: random seed + CPU counters, stretched through repeated SHA-256

use super::{Collector, best_effort};
use crate::context::Context;
use crate::error::{CollectError, ProbeError, ProbeResult};
use crate::models::EntropyHash;
use crate::probe::SystemProbe;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::instrument;

const CANCEL_CHECK_EVERY: u32 = 4096;

impl<P: SystemProbe> Collector<P> {
    /// Deliberately slow; meant to run from the background sampler, not per request.
    #[instrument(skip_all, fields(domain = "hash"))]
    pub async fn collect_hash(&self, ctx: &Context) -> Result<EntropyHash, CollectError> {
        let rounds = self.settings.hash_rounds;
        self.query(ctx, "entropy_hash", move |p, c| entropy_hash(p, c, rounds))
            .await
    }
}

fn entropy_hash<P: SystemProbe + ?Sized>(
    probe: &P,
    ctx: &Context,
    rounds: u32,
) -> ProbeResult<EntropyHash> {
    let mut seed = [0u8; 64];
    rand::rng().fill_bytes(&mut seed);

    let mut hasher = Sha256::new();
    hasher.update(seed);
    if let Some(times) = best_effort("cpu_times", probe.cpu_times(ctx)) {
        for t in &times {
            for v in [t.user, t.system, t.idle, t.iowait] {
                hasher.update(v.to_le_bytes());
            }
        }
    }
    let now = chrono::Utc::now();
    hasher.update(now.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());

    let mut digest = hasher.finalize();
    for round in 0..rounds {
        if round % CANCEL_CHECK_EVERY == 0 && ctx.is_done() {
            return Err(ProbeError::Canceled);
        }
        digest = Sha256::digest(digest);
    }

    Ok(EntropyHash {
        hash: hex::encode(digest),
        bytes: digest.to_vec(),
        rounds,
    })
}
