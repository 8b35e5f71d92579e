//! Cache-first static asset server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderName, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use memento_cache::{OfflineWorker, Served, SourceOrigin};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub type SharedWorker = Arc<OfflineWorker<SourceOrigin>>;

const CACHE_HEADER: HeaderName = HeaderName::from_static("x-memento-cache");

pub fn router(worker: SharedWorker) -> Router {
    Router::new()
        .route("/", get(serve_asset))
        .route("/{*path}", get(serve_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(worker)
}

async fn serve_asset(State(worker): State<SharedWorker>, uri: Uri) -> Response {
    match worker.fetch(uri.path()).await {
        Ok((asset, served)) => {
            let status = StatusCode::from_u16(asset.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let content_type = asset
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let hit = match served {
                Served::Cache => "hit",
                Served::Network => "miss",
            };
            (
                status,
                [
                    (header::CONTENT_TYPE, content_type),
                    (CACHE_HEADER, hit.to_string()),
                ],
                asset.body,
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("{}: {e}", uri.path());
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

/// Install and activate, as a freshly registered worker would. A failed
/// install leaves older generations in place and skips activation.
pub async fn prepare(worker: &OfflineWorker<SourceOrigin>) -> Result<()> {
    match worker.install().await {
        Ok(_) => {
            worker.activate().context("failed to prune stale caches")?;
        }
        Err(e) => tracing::warn!(
            "precache of {} failed, serving from existing caches: {e}",
            worker.cache_name()
        ),
    }
    Ok(())
}

pub async fn run(worker: SharedWorker, port: u16) -> Result<()> {
    prepare(&worker).await?;

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;
    tracing::info!("serving {} on http://{local}", worker.describe_origin());
    println!("listening on http://{local}");

    axum::serve(listener, router(worker))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        return;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use memento_cache::{Asset, CacheStorage, DirOrigin};
    use tempfile::TempDir;

    use super::*;

    async fn spawn(worker: SharedWorker) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(worker)).await.unwrap();
        });
        addr
    }

    fn worker(dir: &TempDir, manifest: &[&str]) -> SharedWorker {
        Arc::new(OfflineWorker::new(
            CacheStorage::open_in_memory().unwrap(),
            "memento-vivere-v4",
            manifest.iter().map(|s| s.to_string()).collect(),
            Some(SourceOrigin::Dir(DirOrigin::new(dir.path()))),
        ))
    }

    #[tokio::test]
    async fn test_serves_precached_then_network() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>memento</h1>").unwrap();
        std::fs::write(dir.path().join("late.txt"), "late").unwrap();

        let worker = worker(&dir, &["./"]);
        prepare(&worker).await.unwrap();
        let addr = spawn(worker).await;
        let client = reqwest::Client::new();

        let root = client.get(format!("http://{addr}/")).send().await.unwrap();
        assert_eq!(root.status().as_u16(), 200);
        assert_eq!(root.headers()["x-memento-cache"], "hit");
        assert_eq!(root.headers()["content-type"], "text/html; charset=utf-8");
        assert_eq!(root.text().await.unwrap(), "<h1>memento</h1>");

        let first = client.get(format!("http://{addr}/late.txt")).send().await.unwrap();
        assert_eq!(first.headers()["x-memento-cache"], "miss");
        let second = client.get(format!("http://{addr}/late.txt")).send().await.unwrap();
        assert_eq!(second.headers()["x-memento-cache"], "hit");
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let dir = TempDir::new().unwrap();
        let addr = spawn(worker(&dir, &[])).await;
        let response = reqwest::get(format!("http://{addr}/nope.css")).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_failed_install_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let worker = worker(&dir, &["./missing.js"]);
        prepare(&worker).await.unwrap();
        assert_eq!(worker.storage().entry_count("memento-vivere-v4").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cache_only_serves_stored_assets() {
        let storage = CacheStorage::open_in_memory().unwrap();
        let index = Asset {
            path: "/".to_string(),
            status: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: b"<h1>memento</h1>".to_vec(),
        };
        storage.put("memento-vivere-v4", &index).unwrap();
        let worker: SharedWorker = Arc::new(OfflineWorker::new(
            storage,
            "memento-vivere-v4",
            vec!["./".to_string()],
            None,
        ));
        prepare(&worker).await.unwrap();
        let addr = spawn(worker).await;

        let root = reqwest::get(format!("http://{addr}/")).await.unwrap();
        assert_eq!(root.status().as_u16(), 200);
        assert_eq!(root.headers()["x-memento-cache"], "hit");
        let missing = reqwest::get(format!("http://{addr}/late.txt")).await.unwrap();
        assert_eq!(missing.status().as_u16(), 502);
    }
}
