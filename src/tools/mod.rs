//! Tool surface exposed to the agent framework
//!
//! Each tool takes JSON arguments and returns a JSON-encoded string, by
//! convention of the hosting transport. Degraded results are payloads, never
//! faults: argument problems and upstream trouble both come back as the
//! error-shaped JSON the orchestrator inspects.

mod alerts;
mod forecast;
mod geocode;

pub use alerts::GetAlertsTool;
pub use forecast::GetForecastTool;
pub use geocode::GeocodeLocationTool;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

/// Describes a tool's interface to the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDeclaration {
    /// Unique tool name
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON Schema for the arguments
    pub parameters: Value,
}

/// A callable operation exposed over the tool transport
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name within the registry
    fn name(&self) -> &str;

    /// Interface description handed to the LLM
    fn declaration(&self) -> ToolDeclaration;

    /// Execute with JSON arguments, returning the JSON-encoded result
    async fn call(&self, args: Value) -> String;
}

/// Error-shaped payload for invalid arguments
pub(crate) fn invalid_args(message: &str) -> String {
    json!({ "error": message }).to_string()
}

/// Registry owning the tools and dispatching calls by name
#[derive(Default)]
pub struct ToolRegistry {
    // Vec preserves declaration order for the LLM
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Declarations of all registered tools, in registration order
    #[must_use]
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.tools.iter().map(|t| t.declaration()).collect()
    }

    /// Look up a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(Box::as_ref)
    }

    /// Dispatch a call; unknown names produce the error-shaped payload
    pub async fn call(&self, name: &str, args: Value) -> String {
        debug!("Dispatching tool call: {name}");
        match self.get(name) {
            Some(tool) => tool.call(args).await,
            None => invalid_args(&format!("Unknown tool: {name}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn declaration(&self) -> ToolDeclaration {
            ToolDeclaration {
                name: self.name().to_string(),
                description: "Echo the arguments back".to_string(),
                parameters: json!({ "type": "object" }),
            }
        }

        async fn call(&self, args: Value) -> String {
            args.to_string()
        }
    }

    #[tokio::test]
    async fn test_registry_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let payload = registry.call("echo", json!({ "a": 1 })).await;
        let value: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_shaped() {
        let registry = ToolRegistry::new();
        let payload = registry.call("missing", json!({})).await;
        let value: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["error"], "Unknown tool: missing");
    }

    #[test]
    fn test_declarations_preserve_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let declarations = registry.declarations();
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, "echo");
    }
}
