//! `geocode_location` tool

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Tool, ToolDeclaration, invalid_args};
use crate::geocoding::GeocodingClient;

/// Converts a location name to coordinates via the geocoding lookup
pub struct GeocodeLocationTool {
    client: GeocodingClient,
}

impl GeocodeLocationTool {
    #[must_use]
    pub fn new(client: GeocodingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GeocodeLocationTool {
    fn name(&self) -> &str {
        "geocode_location"
    }

    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: "Convert a location name (city, address, etc.) to latitude and \
                          longitude coordinates. Use this tool first when you need \
                          coordinates for a location name."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "The location name, city, address, or place (e.g., \"San Francisco\", \"New York, NY\", \"Paris, France\")"
                    }
                },
                "required": ["location"]
            }),
        }
    }

    async fn call(&self, args: Value) -> String {
        let Some(location) = args.get("location").and_then(Value::as_str) else {
            return invalid_args("Missing required argument: location");
        };
        if location.trim().is_empty() {
            return invalid_args("Location must not be empty");
        }

        self.client.geocode(location).await.to_wire_string()
    }
}
