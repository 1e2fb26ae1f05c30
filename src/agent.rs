//! Agent profile for the external orchestrator
//!
//! The orchestrator owns the LLM loop and the event stream; this module only
//! supplies what it is initialized with: the workflow instructions, the tool
//! declarations, and the human-in-the-loop confirmation declaration it must
//! resolve before fetching weather data.

use serde::Serialize;

use crate::models::confirmation;
use crate::tools::{ToolDeclaration, ToolRegistry};

/// Agent name advertised on the discovery endpoint
pub const AGENT_NAME: &str = "weather_assistant";

/// Agent description advertised on the discovery endpoint
pub const AGENT_DESCRIPTION: &str =
    "Weather assistant with geocoding, forecast, and alert tools and human-in-the-loop approval";

/// System instructions describing the geocode -> confirm -> fetch workflow
pub const SYSTEM_INSTRUCTIONS: &str = r#"
You are a helpful weather assistant with tools and human-in-the-loop approval.

Available tools:
1. geocode_location(location) - converts a location name to coordinates.
   Returns {"latitude": number, "longitude": number, "display_name": string}.
2. get_forecast(latitude, longitude) - gets the weather forecast.
   Returns {"temperature_celsius": number, "temperature_fahrenheit": number,
   "conditions": "clear" | "rain" | "cloudy" | "snow" | "storm",
   "wind_speed_mph": number, "wind_speed_text": string, "wind_direction": string,
   "location_name": string, "periods": [...]}.
3. get_alerts(state) - gets active weather alerts for a US state
   (two-letter code like "CA" or "NY").
   Returns {"alerts": [...], "count": number}.

Workflow for weather requests:
1. When the user asks about weather for a location:
   a. Call geocode_location(location) to get coordinates.
   b. Extract the state code from the location if alerts may be relevant.
   c. Call confirm_weather_query with the display_name and coordinates from
      geocoding, and one option for each action:
      [{"description": "Get current forecast", "status": "enabled", "action": "forecast"},
       {"description": "Check weather alerts", "status": "enabled", "action": "alerts"}]
   d. Wait for the user's confirmation with their selected options.
   e. Call only the tools whose action the user selected: get_forecast for
      "forecast", get_alerts for "alerts". Never call a tool whose option was
      not confirmed.
   f. Present the results naturally.
2. When presenting a forecast, mention the temperature in both Celsius and
   Fahrenheit, the conditions, the wind speed and direction, and the location
   name.
3. When presenting alerts, summarize the number of active alerts, the most
   severe first, with a brief description of each.

A result containing an "error" field means the lookup degraded; explain it to
the user instead of retrying. A result containing only a "message" field is a
valid empty result, not a failure.
"#;

/// Declaration of the confirmation gate the orchestrator must issue between
/// geocoding and any weather fetch
#[must_use]
pub fn confirmation_declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: "confirm_weather_query".to_string(),
        description: "Request human confirmation before fetching weather data with selected \
                      options"
            .to_string(),
        parameters: confirmation::parameters_schema(),
    }
}

/// Everything the orchestrator needs to initialize the assistant
#[derive(Debug, Clone, Serialize)]
pub struct AgentProfile {
    /// Agent identifier
    pub name: String,
    /// LLM model the orchestrator should drive
    pub model: String,
    /// System instructions
    pub instructions: String,
    /// Tool declarations, including the confirmation gate
    pub tools: Vec<ToolDeclaration>,
}

impl AgentProfile {
    /// Build the profile from the registry plus the confirmation declaration
    #[must_use]
    pub fn new<S: Into<String>>(model: S, registry: &ToolRegistry) -> Self {
        let mut tools = registry.declarations();
        tools.push(confirmation_declaration());

        Self {
            name: AGENT_NAME.to_string(),
            model: model.into(),
            instructions: SYSTEM_INSTRUCTIONS.to_string(),
            tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_declaration_matches_contract() {
        let declaration = confirmation_declaration();
        assert_eq!(declaration.name, "confirm_weather_query");
        assert_eq!(
            declaration.parameters["required"],
            serde_json::json!(["location", "options"])
        );
    }

    #[test]
    fn test_profile_includes_confirmation_gate() {
        let registry = ToolRegistry::new();
        let profile = AgentProfile::new("gemini-2.0-flash", &registry);
        assert_eq!(profile.name, AGENT_NAME);
        assert!(
            profile
                .tools
                .iter()
                .any(|t| t.name == "confirm_weather_query")
        );
    }

    #[test]
    fn test_instructions_cover_the_workflow() {
        assert!(SYSTEM_INSTRUCTIONS.contains("geocode_location"));
        assert!(SYSTEM_INSTRUCTIONS.contains("confirm_weather_query"));
        assert!(SYSTEM_INSTRUCTIONS.contains("get_forecast"));
        assert!(SYSTEM_INSTRUCTIONS.contains("get_alerts"));
    }
}
