//! `get_forecast` tool

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Tool, ToolDeclaration, invalid_args};
use crate::models::Coordinate;
use crate::nws::NwsClient;

/// Fetches the normalized weather forecast for a coordinate
pub struct GetForecastTool {
    client: NwsClient,
}

impl GetForecastTool {
    #[must_use]
    pub fn new(client: NwsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetForecastTool {
    fn name(&self) -> &str {
        "get_forecast"
    }

    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: "Get the weather forecast for a location by coordinate. Returns \
                          temperature in both Celsius and Fahrenheit, conditions, wind, \
                          and the next forecast periods."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "latitude": {
                        "type": "number",
                        "description": "Latitude of the location"
                    },
                    "longitude": {
                        "type": "number",
                        "description": "Longitude of the location"
                    }
                },
                "required": ["latitude", "longitude"]
            }),
        }
    }

    async fn call(&self, args: Value) -> String {
        let Some(latitude) = args.get("latitude").and_then(Value::as_f64) else {
            return invalid_args("Missing required argument: latitude");
        };
        let Some(longitude) = args.get("longitude").and_then(Value::as_f64) else {
            return invalid_args("Missing required argument: longitude");
        };

        self.client
            .get_forecast(Coordinate::new(latitude, longitude))
            .await
            .to_wire_string()
    }
}
