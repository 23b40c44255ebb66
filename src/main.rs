use anyhow::Result;
use std::sync::Arc;
use sysdash::*;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let shutdown = CancellationToken::new();

    let probe = Arc::new(sysinfo_repo::SysinfoRepo::new());
    let collector = collector::Collector::new(probe, app_config.collector_settings());

    let hash_collector = collector.clone();
    let hash_sampler = Arc::new(
        sampler::Sampler::start(
            shutdown.child_token(),
            app_config.sampler_interval(),
            move |ctx| {
                let c = hash_collector.clone();
                async move { c.collect_hash(&ctx).await }
            },
        )
        .await,
    );
    tracing::info!(
        interval_secs = app_config.sampler.interval_secs,
        "hash sampler started"
    );

    let app = routes::app(
        collector,
        hash_sampler,
        shutdown.clone(),
        app_config.clone(),
    );
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }
    shutdown.cancel();
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
