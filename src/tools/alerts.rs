//! `get_alerts` tool

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Tool, ToolDeclaration, invalid_args};
use crate::nws::NwsClient;

/// Fetches active weather alerts for a US state
pub struct GetAlertsTool {
    client: NwsClient,
}

impl GetAlertsTool {
    #[must_use]
    pub fn new(client: NwsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetAlertsTool {
    fn name(&self) -> &str {
        "get_alerts"
    }

    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: "Get active weather alerts for a US state. Returns the alerts and \
                          their count, or an explicit message when there are none."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "state": {
                        "type": "string",
                        "description": "Two-letter US state code (e.g. CA, NY)"
                    }
                },
                "required": ["state"]
            }),
        }
    }

    async fn call(&self, args: Value) -> String {
        let Some(state) = args.get("state").and_then(Value::as_str) else {
            return invalid_args("Missing required argument: state");
        };
        if state.trim().is_empty() {
            return invalid_args("State must not be empty");
        }

        self.client.get_alerts(state.trim()).await.to_wire_string()
    }
}
