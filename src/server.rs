//! HTTP endpoint serving pipeline results.
//!
//! Every request to `/` or `/news` triggers one independent pipeline run and
//! answers 200 with the envelope; failures have already been turned into the
//! fallback dataset by the pipeline. CORS preflight requests are answered by
//! the CORS layer without running the pipeline.

use crate::fetcher::FetchFeed;
use crate::models::ResultEnvelope;
use crate::pipeline::Pipeline;
use axum::{Json, Router, extract::State, http::Method, routing::get};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Build the router around a shared pipeline.
pub fn router<F>(pipeline: Arc<Pipeline<F>>) -> Router
where
    F: FetchFeed + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(news::<F>))
        .route("/news", get(news::<F>))
        .route("/health", get(health))
        .with_state(pipeline)
        .layer(cors)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve<F>(addr: SocketAddr, pipeline: Arc<Pipeline<F>>) -> Result<(), Box<dyn Error>>
where
    F: FetchFeed + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, feed_url = %pipeline.config().feed_url, "Serving feed endpoint");
    axum::serve(listener, router(pipeline)).await?;
    Ok(())
}

async fn news<F>(State(pipeline): State<Arc<Pipeline<F>>>) -> Json<ResultEnvelope>
where
    F: FetchFeed + Send + Sync + 'static,
{
    Json(pipeline.run().await)
}

async fn health() -> &'static str {
    "ok"
}
