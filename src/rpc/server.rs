//! RPC HTTP Server
//!
//! Axum-based HTTP server exposing the conversion as JSON-RPC on `/` and as
//! plain JSON endpoints.

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::rpc::methods::{
    handle_batch, handle_convert, handle_request, BatchRequest, ConvertRequest, JsonRpcRequest,
    JsonRpcResponse,
};

/// Build the application router
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", post(handle_rpc))
        .route("/convert", post(convert_npub))
        .route("/convert/batch", post(convert_keys))
        .route("/health", get(health))
        .layer(cors)
}

/// Serve on `addr` until Ctrl+C
pub async fn start_rpc_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "RPC server listening");

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Handle incoming JSON-RPC requests
async fn handle_rpc(Json(request): Json<JsonRpcRequest>) -> (StatusCode, Json<JsonRpcResponse>) {
    let response = handle_request(request);
    (StatusCode::OK, Json(response))
}

async fn convert_npub(Json(request): Json<ConvertRequest>) -> (StatusCode, Json<serde_json::Value>) {
    let (status, body) = handle_convert(request);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body))
}

async fn convert_keys(Json(request): Json<BatchRequest>) -> Json<serde_json::Value> {
    Json(handle_batch(request))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
