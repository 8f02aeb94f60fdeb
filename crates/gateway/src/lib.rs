//! Beacon Gateway - credential-hiding metadata proxy.
//!
//! Stands between the browser and the content API: attaches the bearer
//! credential, forwards the two read queries, and passes upstream status,
//! content type, and body through unchanged. Holds no cache and no
//! per-request state; one request's upstream latency never blocks
//! another's.

pub mod config;
pub mod error;
pub mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use bytes::Bytes;
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use config::{GatewayConfig, ResponseMode};
pub use error::GatewayError;
pub use upstream::{ServerListQuery, UpstreamClient, UpstreamError, UpstreamResponse};

/// Shared state of the gateway; read-only after startup.
struct AppState {
    upstream: UpstreamClient,
    servers_mode: ResponseMode,
    metadata_mode: ResponseMode,
}

/// Optional caller overrides for the server-list query.
#[derive(Debug, Default, Deserialize)]
struct ServerListParams {
    limit: Option<String>,
    fields: Option<String>,
    meta: Option<String>,
}

/// GET `/api/servers` - forwards the server-list read.
async fn list_servers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ServerListParams>,
) -> Response {
    let mut query = ServerListQuery::default();
    if let Some(limit) = params.limit {
        query.limit = limit;
    }
    if let Some(fields) = params.fields {
        query.fields = fields;
    }
    if let Some(meta) = params.meta {
        query.meta = meta;
    }

    match state.upstream.server_list(&query).await {
        Ok(upstream) => passthrough(upstream, state.servers_mode),
        Err(error) => proxy_error(&error),
    }
}

/// GET `/api/metadata` - forwards the branding-record read.
async fn app_metadata(State(state): State<Arc<AppState>>) -> Response {
    match state.upstream.app_metadata().await {
        Ok(upstream) => passthrough(upstream, state.metadata_mode),
        Err(error) => proxy_error(&error),
    }
}

/// Maps a transport-level failure to the generic error response.
///
/// Details stay in the server-side log; the caller only ever sees the
/// generic message.
fn proxy_error(error: &UpstreamError) -> Response {
    tracing::error!(error = %error, "proxy error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(serde_json::json!({"error": "Proxy error"})),
    )
        .into_response()
}

/// Hands an upstream response back, preserving status and content type.
fn passthrough(upstream: UpstreamResponse, mode: ResponseMode) -> Response {
    let status =
        StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = HeaderValue::from_str(&upstream.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/json"));
    let body = match mode {
        ResponseMode::Raw => upstream.body,
        ResponseMode::Reserialize => reserialize(upstream.body),
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    response
}

/// Re-serializes a JSON body; anything that does not parse passes through
/// untouched.
fn reserialize(body: Bytes) -> Bytes {
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(value) => serde_json::to_vec(&value).map_or(body, Bytes::from),
        Err(_) => body,
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        origin.parse::<HeaderValue>().map_or_else(
            |_| {
                tracing::warn!(origin, "invalid CORS origin, falling back to wildcard");
                AllowOrigin::any()
            },
            AllowOrigin::exact,
        )
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(allow_origin)
}

/// Builds the gateway router from validated configuration.
///
/// # Errors
///
/// Returns an error when the upstream client cannot be constructed.
pub fn router(config: &GatewayConfig) -> Result<Router, GatewayError> {
    let state = Arc::new(AppState {
        upstream: UpstreamClient::new(config)?,
        servers_mode: config.servers_response_mode,
        metadata_mode: config.metadata_response_mode,
    });

    Ok(Router::new()
        .route("/api/servers", get(list_servers))
        .route("/api/metadata", get(app_metadata))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origin))
        .with_state(state))
}

/// Binds the listener and serves until shutdown.
///
/// # Errors
///
/// Returns an error when the address does not parse, the listener cannot
/// bind, or serving fails.
pub async fn run_server(config: GatewayConfig) -> Result<(), GatewayError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| GatewayError::InvalidConfig(format!("listen address: {e}")))?;
    let app = router(&config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("gateway listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
