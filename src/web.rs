//! HTTP tool provider server
//!
//! Small sidecar surface the orchestrator talks to: discovery of the agent
//! profile and tool declarations, plus invocation of individual tools. Tool
//! results are JSON-encoded strings, so degraded lookups still come back as
//! HTTP 200 with an "error" field in the payload.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::agent::{AGENT_DESCRIPTION, AgentProfile};
use crate::tools::ToolRegistry;

/// Shared state for the tool provider endpoints
#[derive(Clone)]
pub struct AppState {
    /// Registry of invocable tools
    pub registry: Arc<ToolRegistry>,
    /// Agent profile served on the discovery endpoints
    pub profile: Arc<AgentProfile>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, profile: Arc<AgentProfile>) -> Self {
        Self { registry, profile }
    }
}

/// Build the router with all tool provider routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info_endpoint))
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(call_tool))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn run(port: u16, state: AppState) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind tool provider to {addr}"))?;

    info!("Tool provider listening on {}", addr);

    axum::serve(listener, router(state))
        .await
        .context("Tool provider server failed")?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn info_endpoint(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "version": crate::VERSION,
        "agents": {
            (state.profile.name.as_str()): {
                "description": AGENT_DESCRIPTION,
                "model": state.profile.model,
            }
        }
    }))
}

async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    let tools = &state.profile.tools;
    Json(json!({ "tools": tools }))
}

async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> Response {
    if state.registry.get(&name).is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown tool: {name}") })),
        )
            .into_response();
    }

    let payload = state.registry.call(&name, args).await;
    Json(json!({ "result": payload })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentProfile;

    fn state() -> AppState {
        let registry = Arc::new(ToolRegistry::new());
        let profile = Arc::new(AgentProfile::new("gemini-2.0-flash", &registry));
        AppState::new(registry, profile)
    }

    #[tokio::test]
    async fn test_health_payload() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_info_lists_the_agent() {
        let Json(body) = info_endpoint(State(state())).await;
        assert_eq!(body["version"], crate::VERSION);
        assert!(body["agents"]["weather_assistant"].is_object());
    }

    #[tokio::test]
    async fn test_tools_include_confirmation_gate() {
        let Json(body) = list_tools(State(state())).await;
        let names: Vec<&str> = body["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert!(names.contains(&"confirm_weather_query"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_found() {
        let response = call_tool(
            State(state()),
            Path("does_not_exist".to_string()),
            Json(json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
