//! Human-in-the-loop confirmation contract
//!
//! Between geocoding and any weather fetch, the orchestrator must issue a
//! `confirm_weather_query` request, wait for the user's resolved selection,
//! and call only the tools whose action was selected. This module is pure
//! schema: nothing in this crate executes the gate, and an external UI
//! resolves it.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Whether an option is pre-selected when presented to the user
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OptionStatus {
    Enabled,
    Disabled,
}

/// The tool a confirmed option authorizes
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherAction {
    Forecast,
    Alerts,
}

/// One user-selectable action in the confirmation dialog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfirmationOption {
    /// Human-readable description of the option
    pub description: String,
    /// Default selection state
    pub status: OptionStatus,
    /// The action this option represents
    pub action: WeatherAction,
}

/// Confirmation request the orchestrator presents to the user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfirmationRequest {
    /// The location name the user asked about
    pub location: String,
    /// Latitude from geocoding
    pub latitude: f64,
    /// Longitude from geocoding
    pub longitude: f64,
    /// Selectable actions; exactly one option per action value
    pub options: Vec<ConfirmationOption>,
}

impl ConfirmationRequest {
    /// Standard request offering both actions exactly once, enabled by default
    #[must_use]
    pub fn standard<S: Into<String>>(location: S, latitude: f64, longitude: f64) -> Self {
        Self {
            location: location.into(),
            latitude,
            longitude,
            options: vec![
                ConfirmationOption {
                    description: "Get current forecast".to_string(),
                    status: OptionStatus::Enabled,
                    action: WeatherAction::Forecast,
                },
                ConfirmationOption {
                    description: "Check weather alerts".to_string(),
                    status: OptionStatus::Enabled,
                    action: WeatherAction::Alerts,
                },
            ],
        }
    }

    /// Check the one-option-per-action invariant
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let forecast = self
            .options
            .iter()
            .filter(|o| o.action == WeatherAction::Forecast)
            .count();
        let alerts = self
            .options
            .iter()
            .filter(|o| o.action == WeatherAction::Alerts)
            .count();
        forecast == 1 && alerts == 1
    }
}

/// JSON Schema for the confirmation parameters, as declared to the LLM
#[must_use]
pub fn parameters_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "location": {
                "type": "string",
                "description": "The location name the user asked about"
            },
            "latitude": {
                "type": "number",
                "description": "The latitude coordinate from geocoding"
            },
            "longitude": {
                "type": "number",
                "description": "The longitude coordinate from geocoding"
            },
            "options": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "description": {
                            "type": "string",
                            "description": "Human-readable description of this option"
                        },
                        "status": {
                            "type": "string",
                            "enum": ["enabled", "disabled"],
                            "description": "Whether this option should be enabled by default"
                        },
                        "action": {
                            "type": "string",
                            "enum": ["forecast", "alerts"],
                            "description": "The action this option represents"
                        }
                    },
                    "required": ["description", "status", "action"]
                },
                "description": "Available weather information options for user to select"
            }
        },
        "required": ["location", "options"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_request_is_well_formed() {
        let request = ConfirmationRequest::standard("San Francisco, California", 37.77, -122.42);
        assert!(request.is_well_formed());
        assert_eq!(request.options.len(), 2);
    }

    #[test]
    fn test_duplicate_action_is_rejected() {
        let mut request = ConfirmationRequest::standard("Denver, Colorado", 39.74, -104.99);
        request.options.push(ConfirmationOption {
            description: "Another forecast".to_string(),
            status: OptionStatus::Disabled,
            action: WeatherAction::Forecast,
        });
        assert!(!request.is_well_formed());
    }

    #[test]
    fn test_missing_action_is_rejected() {
        let mut request = ConfirmationRequest::standard("Denver, Colorado", 39.74, -104.99);
        request.options.retain(|o| o.action != WeatherAction::Alerts);
        assert!(!request.is_well_formed());
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        let option = ConfirmationOption {
            description: "Get current forecast".to_string(),
            status: OptionStatus::Enabled,
            action: WeatherAction::Forecast,
        };
        let value = serde_json::to_value(&option).unwrap();
        assert_eq!(value["status"], "enabled");
        assert_eq!(value["action"], "forecast");
    }

    #[test]
    fn test_request_round_trips_through_json() {
        let request = ConfirmationRequest::standard("Paris, France", 48.8566, 2.3522);
        let encoded = serde_json::to_string(&request).unwrap();
        let decoded: ConfirmationRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_parameters_schema_shape() {
        let schema = parameters_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(
            schema["required"],
            serde_json::json!(["location", "options"])
        );
        assert_eq!(
            schema["properties"]["options"]["items"]["properties"]["action"]["enum"],
            serde_json::json!(["forecast", "alerts"])
        );
    }
}
