use crate::types::{ToolRequest, ToolResponse};
use axum::{
    body::Bytes,
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chill_core::{MoodSnapshot, Tool, ToolOutcome, ToolRegistry};
use chill_limbic::ActionExecutor;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state for the gateway server.
#[derive(Clone)]
struct AppState {
    registry: Arc<ToolRegistry>,
    executor: Arc<ActionExecutor>,
    /// Number of active WebSocket connections.
    active_ws: Arc<AtomicUsize>,
}

/// The gateway HTTP + WebSocket server.
///
/// Exposes the tool registry to remote callers:
/// - `GET /health`: health check
/// - `GET /tools`: tool schemas
/// - `POST /tools/:name`: run one tool
/// - `GET /status`: current mood snapshot
/// - `GET /ws`: WebSocket, one `ToolRequest` per text frame
///
/// Tool calls have no timeout; a penalized break runs to completion.
pub struct GatewayServer {
    state: AppState,
    host: String,
    port: u16,
}

impl GatewayServer {
    pub fn new(
        registry: Arc<ToolRegistry>,
        executor: Arc<ActionExecutor>,
        host: &str,
        port: u16,
    ) -> Self {
        Self {
            state: AppState {
                registry,
                executor,
                active_ws: Arc::new(AtomicUsize::new(0)),
            },
            host: host.to_string(),
            port,
        }
    }

    /// Number of active WebSocket connections.
    pub fn active_connections(&self) -> Arc<AtomicUsize> {
        self.state.active_ws.clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/tools", get(list_tools))
            .route("/tools/:name", post(call_tool))
            .route("/status", get(status))
            .route("/ws", get(ws_upgrade))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Bind and serve until the listener fails.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| anyhow::anyhow!("Gateway failed to bind {}: {}", addr, e))?;
        tracing::info!("Gateway listening on {}", addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Gateway server error: {}", e))
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

async fn list_tools(State(state): State<AppState>) -> Json<Vec<Tool>> {
    Json(state.registry.available_tools())
}

async fn status(State(state): State<AppState>) -> Json<MoodSnapshot> {
    Json(state.executor.snapshot().await)
}

/// POST /tools/:name: body is optional JSON input.
async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<ToolResponse>) {
    if !state.registry.contains(&name) {
        let outcome = ToolOutcome::permanent_error(format!("Unknown tool: {}", name));
        return (StatusCode::NOT_FOUND, Json(ToolResponse::from_outcome(&name, outcome)));
    }

    let input: Value = if body.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(v) => v,
            Err(e) => {
                let outcome = ToolOutcome::permanent_error(format!("Invalid JSON: {}", e));
                return (StatusCode::BAD_REQUEST, Json(ToolResponse::from_outcome(&name, outcome)));
            }
        }
    };

    let outcome = state.registry.dispatch(&name, &input).await;
    (StatusCode::OK, Json(ToolResponse::from_outcome(&name, outcome)))
}

/// GET /ws: WebSocket upgrade.
async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
///
/// Inbound text frames are answered in order; the loop ends on close or on
/// the first failed send.
async fn handle_ws(socket: WebSocket, state: AppState) {
    state.active_ws.fetch_add(1, Ordering::Relaxed);
    let (mut ws_tx, mut ws_rx) = socket.split();

    while let Some(Ok(msg)) = ws_rx.next().await {
        match msg {
            Message::Text(text) => {
                let reply = frame_reply(&state, &text).await;
                if ws_tx.send(Message::Text(reply.into())).await.is_err() {
                    tracing::debug!("WebSocket send failed, closing connection");
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    state.active_ws.fetch_sub(1, Ordering::Relaxed);
}

/// Parse one frame as a ToolRequest, dispatch it and serialize the answer.
async fn frame_reply(state: &AppState, text: &str) -> String {
    let req: ToolRequest = match serde_json::from_str(text) {
        Ok(r) => r,
        Err(e) => {
            return serde_json::json!({"error": format!("Invalid JSON: {}", e)}).to_string();
        }
    };
    let outcome = state.registry.dispatch(&req.tool, &req.arguments).await;
    let response = ToolResponse::from_outcome(&req.tool, outcome);
    serde_json::to_string(&response).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chill_core::{ActionCatalog, BossAlertness, MoodState};
    use chill_expression::ChillComposer;

    fn state() -> AppState {
        let executor = Arc::new(ActionExecutor::new(
            MoodState::default(),
            ActionCatalog::standard(),
            Arc::new(BossAlertness::new(0).unwrap()),
            Arc::new(ChillComposer::new()),
        ));
        let mut registry = ToolRegistry::new();
        chill_limbic::register_all(&mut registry, &executor);
        AppState {
            registry: Arc::new(registry),
            executor,
            active_ws: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn test_list_tools() {
        let Json(tools) = list_tools(State(state())).await;
        assert_eq!(tools.len(), 9);
    }

    #[tokio::test]
    async fn test_call_tool_runs_break() {
        let st = state();
        let (code, Json(resp)) =
            call_tool(State(st.clone()), Path("show_meme".to_string()), Bytes::new()).await;
        assert_eq!(code, StatusCode::OK);
        assert!(!resp.is_error);
        assert!(resp.content.contains("Break Summary:"));

        let Json(snap) = status(State(st)).await;
        assert_eq!(snap.history, vec![chill_core::ActionId::ShowMeme]);
    }

    #[tokio::test]
    async fn test_call_unknown_tool_is_404() {
        let (code, Json(resp)) =
            call_tool(State(state()), Path("nap_time".to_string()), Bytes::new()).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert!(resp.is_error);
    }

    #[tokio::test]
    async fn test_call_tool_bad_json_is_400() {
        let (code, _) = call_tool(
            State(state()),
            Path("show_meme".to_string()),
            Bytes::from_static(b"{not json"),
        )
        .await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_gateway_server_creates() {
        let st = state();
        let server = GatewayServer::new(st.registry, st.executor, "127.0.0.1", 0);
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 0);
        assert_eq!(server.active_connections().load(Ordering::Relaxed), 0);
        let _router = server.router();
    }

    #[tokio::test]
    async fn test_ws_frame_reply() {
        let st = state();
        let reply = frame_reply(&st, r#"{"tool":"coffee_mission"}"#).await;
        let resp: ToolResponse = serde_json::from_str(&reply).unwrap();
        assert_eq!(resp.tool, "coffee_mission");
        assert!(!resp.is_error);

        let reply = frame_reply(&st, "not json").await;
        let v: Value = serde_json::from_str(&reply).unwrap();
        assert!(v["error"].as_str().unwrap().starts_with("Invalid JSON"));

        let reply = frame_reply(&st, r#"{"tool":"nap_time"}"#).await;
        let resp: ToolResponse = serde_json::from_str(&reply).unwrap();
        assert!(resp.is_error);
    }
}
