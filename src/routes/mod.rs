// HTTP routes: JSON API per domain, aggregate, sampled hash, static UI

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::collector::Collector;
use crate::config::AppConfig;
use crate::context::Context;
use crate::models::EntropyHash;
use crate::probe::SystemProbe;
use crate::sampler::Sampler;

pub(crate) struct AppState<P> {
    pub(crate) collector: Collector<P>,
    pub(crate) hash_sampler: Arc<Sampler<EntropyHash>>,
    pub(crate) shutdown: CancellationToken,
    pub(crate) config: AppConfig,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            collector: self.collector.clone(),
            hash_sampler: self.hash_sampler.clone(),
            shutdown: self.shutdown.clone(),
            config: self.config.clone(),
        }
    }
}

impl<P> AppState<P> {
    /// Per-request context; ends on shutdown or when the caller cancels it.
    pub(crate) fn request_context(&self) -> Context {
        Context::from_token(self.shutdown.child_token())
    }
}

pub fn app<P: SystemProbe>(
    collector: Collector<P>,
    hash_sampler: Arc<Sampler<EntropyHash>>,
    shutdown: CancellationToken,
    config: AppConfig,
) -> Router {
    let web_root = config.server.web_root.clone();
    let state = AppState {
        collector,
        hash_sampler,
        shutdown,
        config,
    };
    let mut router = Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/cpu", get(http::cpu_handler::<P>)) // GET /api/cpu
        .route("/api/mem", get(http::mem_handler::<P>)) // GET /api/mem
        .route("/api/disk", get(http::disk_handler::<P>)) // GET /api/disk
        .route("/api/net", get(http::net_handler::<P>)) // GET /api/net?connections=1
        .route("/api/host", get(http::host_handler::<P>)) // GET /api/host
        .route("/api/processes", get(http::processes_handler::<P>)) // GET /api/processes?top=N
        .route("/api/all", get(http::all_handler::<P>)) // GET /api/all
        .route("/api/hash", get(http::hash_handler::<P>)); // GET /api/hash
    if let Some(root) = web_root {
        router = router.fallback_service(ServeDir::new(root));
    }
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
