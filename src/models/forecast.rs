//! Normalized forecast models derived from the NWS responses

use serde::{Deserialize, Serialize};

/// Coarse condition category derived from the forecast narrative.
///
/// This is a best-effort keyword tag, not an exact mapping of the upstream
/// weather taxonomy; see [`crate::nws::classify_conditions`] for the fixed
/// priority order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Conditions {
    Clear,
    Rain,
    Cloudy,
    Snow,
    Storm,
}

impl Conditions {
    /// The lowercase tag used on the wire
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Conditions::Clear => "clear",
            Conditions::Rain => "rain",
            Conditions::Cloudy => "cloudy",
            Conditions::Snow => "snow",
            Conditions::Storm => "storm",
        }
    }
}

/// One upcoming forecast period
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PeriodSummary {
    /// Period name ("Tonight", "Saturday", ...)
    pub name: String,
    /// Temperature in the upstream unit
    pub temperature: f64,
    /// Upstream temperature unit ("F")
    pub temperature_unit: String,
    /// Free-text wind speed ("10 to 15 mph")
    pub wind_speed: String,
    /// Wind direction ("NW")
    pub wind_direction: String,
    /// Full narrative forecast for the period
    pub forecast_text: String,
    /// Condition tag computed for the current period, not recomputed here
    pub conditions: Conditions,
}

/// Normalized forecast for a coordinate
///
/// Fahrenheit is the upstream unit of truth; Celsius is derived and is the
/// primary display value. No mutation after construction.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastReport {
    /// Current temperature in Celsius, rounded to one decimal place
    pub temperature_celsius: f64,
    /// Current temperature in Fahrenheit, as reported upstream
    pub temperature_fahrenheit: f64,
    /// Coarse condition tag for the current period
    pub conditions: Conditions,
    /// First integer of the free-text wind speed, 0 when no digits are present
    pub wind_speed_mph: i64,
    /// The original free-text wind speed
    pub wind_speed_text: String,
    /// Wind direction for the current period
    pub wind_direction: String,
    /// "<city>, <state>" label, or the raw coordinate pair as fallback
    pub location_name: String,
    /// Upcoming periods, truncated to five
    pub periods: Vec<PeriodSummary>,
}
