// GET handlers: map collector results to 200 (data) or 500 ({error, data})

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::AppState;
use crate::error::CollectError;
use crate::probe::SystemProbe;
use crate::{NAME, VERSION};

#[derive(Debug, Deserialize)]
pub(super) struct NetQuery {
    connections: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProcessQuery {
    top: Option<String>,
}

#[derive(Debug, Serialize)]
struct HashResponse {
    randhash: String,
    hashbytes_hex: String,
    #[serde(rename = "updatedAt")]
    updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

fn reply<T: Serialize>(result: Result<T, CollectError>) -> Response {
    match result {
        Ok(data) => Json(data).into_response(),
        Err(e) => failure(&e, None::<T>),
    }
}

fn failure<T: Serialize>(error: &impl Display, data: Option<T>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": error.to_string(),
            "data": data,
        })),
    )
        .into_response()
}

/// Positive integer from `?top=`, otherwise `default`.
fn parse_top(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

pub(super) async fn cpu_handler<P: SystemProbe>(State(state): State<AppState<P>>) -> Response {
    let ctx = state.request_context();
    let _cancel = ctx.cancel_on_drop();
    reply(state.collector.collect_cpu(&ctx).await)
}

pub(super) async fn mem_handler<P: SystemProbe>(State(state): State<AppState<P>>) -> Response {
    let ctx = state.request_context();
    let _cancel = ctx.cancel_on_drop();
    reply(state.collector.collect_mem(&ctx).await)
}

pub(super) async fn disk_handler<P: SystemProbe>(State(state): State<AppState<P>>) -> Response {
    let ctx = state.request_context();
    let _cancel = ctx.cancel_on_drop();
    reply(state.collector.collect_disk(&ctx).await)
}

/// GET /api/net — socket table only with `?connections=1`.
pub(super) async fn net_handler<P: SystemProbe>(
    State(state): State<AppState<P>>,
    Query(query): Query<NetQuery>,
) -> Response {
    let include_connections = query.connections.as_deref() == Some("1");
    let ctx = state.request_context();
    let _cancel = ctx.cancel_on_drop();
    reply(state.collector.collect_net(&ctx, include_connections).await)
}

pub(super) async fn host_handler<P: SystemProbe>(State(state): State<AppState<P>>) -> Response {
    let ctx = state.request_context();
    let _cancel = ctx.cancel_on_drop();
    reply(state.collector.collect_host(&ctx).await)
}

pub(super) async fn processes_handler<P: SystemProbe>(
    State(state): State<AppState<P>>,
    Query(query): Query<ProcessQuery>,
) -> Response {
    let top_n = parse_top(query.top.as_deref(), state.config.collection.default_top_n);
    let ctx = state.request_context();
    let _cancel = ctx.cancel_on_drop();
    reply(state.collector.collect_processes(&ctx, top_n).await)
}

/// GET /api/all — partial snapshot is returned with the 500 when a domain degraded.
pub(super) async fn all_handler<P: SystemProbe>(State(state): State<AppState<P>>) -> Response {
    let ctx = state.request_context();
    let _cancel = ctx.cancel_on_drop();
    let (snapshot, error) = state.collector.collect_all(Some(&ctx)).await;
    match error {
        None => Json(snapshot).into_response(),
        Some(e) => {
            tracing::debug!(domain = %e.domain, present = snapshot.present(), "partial snapshot");
            failure(&e, Some(snapshot))
        }
    }
}

/// GET /api/hash — always 200; a failed latest attempt is reported as `warning`.
pub(super) async fn hash_handler<P: SystemProbe>(State(state): State<AppState<P>>) -> Response {
    let sample = state.hash_sampler.snapshot();
    let (randhash, hashbytes_hex) = match &sample.value {
        Some(v) => (v.hash.clone(), hex::encode(&v.bytes)),
        None => (String::new(), String::new()),
    };
    Json(HashResponse {
        randhash,
        hashbytes_hex,
        updated_at: sample.at.to_rfc3339_opts(SecondsFormat::Secs, true),
        warning: sample.error.map(|e| e.to_string()),
    })
    .into_response()
}
