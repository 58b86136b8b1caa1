//! HTTP transport for the tool server

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::VERSION;
use crate::location_provider::LocationProvider;
use crate::mcp::McpServer;
use crate::weather::WeatherProvider;

/// Routes: `POST /mcp` for JSON-RPC and `GET /health`
pub fn router<L, W>(server: McpServer<L, W>) -> Router
where
    L: LocationProvider + 'static,
    W: WeatherProvider + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/mcp", post(handle_mcp::<L, W>))
        .route("/health", get(health))
        .with_state(server)
        .layer(cors)
}

async fn handle_mcp<L, W>(State(server): State<McpServer<L, W>>, body: String) -> Response
where
    L: LocationProvider + 'static,
    W: WeatherProvider + 'static,
{
    match server.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

/// Serve on an already bound listener
pub async fn serve<L, W>(listener: TcpListener, server: McpServer<L, W>) -> Result<()>
where
    L: LocationProvider + 'static,
    W: WeatherProvider + 'static,
{
    axum::serve(listener, router(server))
        .await
        .context("HTTP server failed")
}

/// Bind `0.0.0.0:port` and serve until the process ends
pub async fn run<L, W>(port: u16, server: McpServer<L, W>) -> Result<()>
where
    L: LocationProvider + 'static,
    W: WeatherProvider + 'static,
{
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Tool server running at http://localhost:{}/mcp", port);
    serve(listener, server).await
}
