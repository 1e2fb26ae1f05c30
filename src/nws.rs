//! National Weather Service lookups and normalization
//!
//! Two-stage forecast fetch (point descriptor, then detailed forecast) and the
//! active-alerts lookup, each reshaped into the typed reports of
//! [`crate::models`]. Either forecast stage failing yields a typed error
//! outcome; partial results are never returned.

use tracing::{info, instrument, warn};

use crate::client::{FetchError, UpstreamClient};
use crate::models::{
    AlertReport, AlertSummary, Conditions, Coordinate, ForecastReport, PeriodSummary,
};
use crate::outcome::{ErrorKind, Outcome};

/// Default NWS endpoint
pub const NWS_BASE: &str = "https://api.weather.gov";

/// Forecast periods returned to the caller, however many the upstream supplies
pub const MAX_PERIODS: usize = 5;

/// Decimal places the grid lookup tolerates
const COORDINATE_PRECISION: u32 = 4;

const ACCEPT_GEO_JSON: &str = "application/geo+json";

/// NWS API response structures; only the fields the assistant consumes
mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Points {
        pub properties: Option<PointsProperties>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PointsProperties {
        /// URL of the detailed forecast for this grid point
        pub forecast: Option<String>,
        #[serde(rename = "relativeLocation")]
        pub relative_location: Option<RelativeLocation>,
    }

    #[derive(Debug, Deserialize)]
    pub struct RelativeLocation {
        pub properties: Option<RelativeLocationProperties>,
    }

    #[derive(Debug, Deserialize)]
    pub struct RelativeLocationProperties {
        pub city: Option<String>,
        pub state: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Forecast {
        pub properties: Option<ForecastProperties>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastProperties {
        pub periods: Option<Vec<Period>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Period {
        pub name: Option<String>,
        pub temperature: Option<f64>,
        #[serde(rename = "temperatureUnit")]
        pub temperature_unit: Option<String>,
        #[serde(rename = "windSpeed")]
        pub wind_speed: Option<String>,
        #[serde(rename = "windDirection")]
        pub wind_direction: Option<String>,
        #[serde(rename = "detailedForecast")]
        pub detailed_forecast: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Alerts {
        pub features: Option<Vec<AlertFeature>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AlertFeature {
        pub properties: Option<AlertProperties>,
    }

    #[derive(Debug, Deserialize, Default)]
    pub struct AlertProperties {
        pub event: Option<String>,
        #[serde(rename = "areaDesc")]
        pub area_desc: Option<String>,
        pub severity: Option<String>,
        pub description: Option<String>,
        pub instruction: Option<String>,
    }
}

/// Classify a forecast narrative into a coarse condition tag.
///
/// First keyword match wins; the priority order is fixed policy rather than
/// weather taxonomy, so text containing both "rain" and "cloud" classifies as
/// rain. Text matching nothing is reported as clear.
#[must_use]
pub fn classify_conditions(detailed_forecast: &str) -> Conditions {
    let text = detailed_forecast.to_lowercase();
    if text.contains("rain") || text.contains("shower") {
        Conditions::Rain
    } else if text.contains("cloud") || text.contains("overcast") {
        Conditions::Cloudy
    } else if text.contains("snow") {
        Conditions::Snow
    } else if text.contains("storm") || text.contains("thunder") {
        Conditions::Storm
    } else {
        Conditions::Clear
    }
}

/// Extract the first integer from a free-text wind speed
/// ("10 to 15 mph" yields 10), defaulting to 0 when no digits are present
#[must_use]
pub fn extract_wind_speed(wind_text: &str) -> i64 {
    let digits: String = wind_text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Convert Fahrenheit to Celsius at one decimal place.
///
/// Rounding is half-away-from-zero via `f64::round` on the scaled value; the
/// tests pin this choice.
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (((fahrenheit - 32.0) * 5.0 / 9.0) * 10.0).round() / 10.0
}

/// Client for the NWS points, forecast, and alerts endpoints
#[derive(Debug, Clone)]
pub struct NwsClient {
    http: UpstreamClient,
    base_url: String,
}

impl NwsClient {
    /// Create a client against the given base URL
    #[must_use]
    pub fn new<S: Into<String>>(http: UpstreamClient, base_url: S) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch and normalize the forecast for a coordinate.
    ///
    /// Stage one resolves the coordinate (rounded to four decimal places) to a
    /// grid descriptor; stage two fetches the forecast URL it names.
    #[instrument(skip(self))]
    pub async fn get_forecast(&self, coordinate: Coordinate) -> Outcome<ForecastReport> {
        let rounded = coordinate.rounded(COORDINATE_PRECISION);
        let points_url = format!(
            "{}/points/{},{}",
            self.base_url, rounded.latitude, rounded.longitude
        );

        let points: wire::Points = match self.http.get_json(&points_url, ACCEPT_GEO_JSON).await {
            Ok(points) => points,
            Err(e) => {
                return fetch_outcome(e, "Unable to fetch forecast data for this location.");
            }
        };
        let Some(point_properties) = points.properties else {
            return Outcome::error(
                ErrorKind::MalformedResponse,
                "Unable to fetch forecast data for this location.",
            );
        };
        let Some(forecast_url) = point_properties.forecast.clone() else {
            return Outcome::error(
                ErrorKind::MalformedResponse,
                "Unable to fetch forecast data for this location.",
            );
        };

        let forecast: wire::Forecast = match self.http.get_json(&forecast_url, ACCEPT_GEO_JSON).await
        {
            Ok(forecast) => forecast,
            Err(e) => return fetch_outcome(e, "Unable to fetch detailed forecast."),
        };
        let Some(forecast_properties) = forecast.properties else {
            return Outcome::error(ErrorKind::MalformedResponse, "Unable to fetch detailed forecast.");
        };

        let outcome = normalize_forecast(&point_properties, forecast_properties, coordinate);
        if let Outcome::Ok(report) = &outcome {
            info!(
                "Forecast for {}: {}°C, {}",
                report.location_name,
                report.temperature_celsius,
                report.conditions.as_str()
            );
        }
        outcome
    }

    /// Fetch all active alerts for a two-letter US state code.
    ///
    /// The three outcomes stay distinguishable: error, explicit "no active
    /// alerts", or a report whose count equals the alert sequence length.
    #[instrument(skip(self))]
    pub async fn get_alerts(&self, state: &str) -> Outcome<AlertReport> {
        let url = format!(
            "{}/alerts/active/area/{}",
            self.base_url,
            urlencoding::encode(state)
        );

        let alerts: wire::Alerts = match self.http.get_json(&url, ACCEPT_GEO_JSON).await {
            Ok(alerts) => alerts,
            Err(e) => return fetch_outcome(e, "Unable to fetch alerts or no alerts found."),
        };

        normalize_alerts(alerts)
    }
}

fn fetch_outcome<T>(error: FetchError, message: &str) -> Outcome<T> {
    warn!("NWS request failed: {error}");
    let kind = if error.is_malformed() {
        ErrorKind::MalformedResponse
    } else {
        ErrorKind::UpstreamUnavailable
    };
    Outcome::error(kind, message)
}

/// "<city>, <state>" when the grid descriptor carries both, otherwise the raw
/// coordinate pair the caller supplied
fn location_label(points: &wire::PointsProperties, coordinate: Coordinate) -> String {
    let relative = points
        .relative_location
        .as_ref()
        .and_then(|r| r.properties.as_ref());

    if let Some(properties) = relative
        && let (Some(city), Some(state)) = (properties.city.as_deref(), properties.state.as_deref())
        && !city.is_empty()
        && !state.is_empty()
    {
        return format!("{city}, {state}");
    }

    coordinate.display_pair()
}

fn normalize_forecast(
    points: &wire::PointsProperties,
    forecast: wire::ForecastProperties,
    coordinate: Coordinate,
) -> Outcome<ForecastReport> {
    let Some(periods) = forecast.periods.filter(|p| !p.is_empty()) else {
        return Outcome::error(ErrorKind::MalformedResponse, "No forecast data available.");
    };

    let current = &periods[0];
    let Some(temperature_fahrenheit) = current.temperature else {
        return Outcome::error(
            ErrorKind::MalformedResponse,
            "Forecast period was missing a temperature.",
        );
    };

    let detailed = current.detailed_forecast.as_deref().unwrap_or_default();
    let conditions = classify_conditions(detailed);
    let wind_speed_text = current.wind_speed.clone().unwrap_or_default();
    let wind_speed_mph = extract_wind_speed(&wind_speed_text);

    let period_summaries = periods
        .iter()
        .take(MAX_PERIODS)
        .map(|p| PeriodSummary {
            name: p.name.clone().unwrap_or_default(),
            temperature: p.temperature.unwrap_or(0.0),
            temperature_unit: p.temperature_unit.clone().unwrap_or_else(|| "F".to_string()),
            wind_speed: p.wind_speed.clone().unwrap_or_default(),
            wind_direction: p.wind_direction.clone().unwrap_or_default(),
            forecast_text: p.detailed_forecast.clone().unwrap_or_default(),
            // The tag computed for the current period, not recomputed here
            conditions,
        })
        .collect();

    Outcome::Ok(ForecastReport {
        temperature_celsius: fahrenheit_to_celsius(temperature_fahrenheit),
        temperature_fahrenheit,
        conditions,
        wind_speed_mph,
        wind_speed_text,
        wind_direction: current.wind_direction.clone().unwrap_or_default(),
        location_name: location_label(points, coordinate),
        periods: period_summaries,
    })
}

fn normalize_alerts(alerts: wire::Alerts) -> Outcome<AlertReport> {
    let Some(features) = alerts.features else {
        return Outcome::error(
            ErrorKind::MalformedResponse,
            "Unable to fetch alerts or no alerts found.",
        );
    };

    if features.is_empty() {
        return Outcome::empty("No active alerts for this state.");
    }

    let summaries = features
        .into_iter()
        .map(|f| summarize_alert(f.properties.unwrap_or_default()))
        .collect();

    Outcome::Ok(AlertReport::new(summaries))
}

fn summarize_alert(properties: wire::AlertProperties) -> AlertSummary {
    AlertSummary {
        event: properties.event.unwrap_or_else(|| "Unknown".to_string()),
        area: properties.area_desc.unwrap_or_else(|| "Unknown".to_string()),
        severity: properties.severity.unwrap_or_else(|| "Unknown".to_string()),
        description: properties
            .description
            .unwrap_or_else(|| "No description available".to_string()),
        instructions: properties
            .instruction
            .unwrap_or_else(|| "No specific instructions provided".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("Light rain expected in the afternoon.", Conditions::Rain)]
    #[case("Scattered showers after midnight.", Conditions::Rain)]
    #[case("Mostly cloudy with a high near 60.", Conditions::Cloudy)]
    #[case("Overcast throughout the day.", Conditions::Cloudy)]
    #[case("Snow accumulation of 2 inches.", Conditions::Snow)]
    #[case("Thunderstorms likely in the evening.", Conditions::Storm)]
    #[case("Sunny, with a high near 70.", Conditions::Clear)]
    #[case("Clear skies tonight.", Conditions::Clear)]
    #[case("Patchy fog before 9am.", Conditions::Clear)]
    fn test_classify_conditions(#[case] text: &str, #[case] expected: Conditions) {
        assert_eq!(classify_conditions(text), expected);
    }

    #[test]
    fn test_classifier_priority_rain_beats_cloud() {
        // Order-sensitive: rain is checked before cloud
        let text = "Cloudy with periods of rain.";
        assert_eq!(classify_conditions(text), Conditions::Rain);
    }

    #[test]
    fn test_classifier_is_case_insensitive() {
        assert_eq!(classify_conditions("SNOW LIKELY"), Conditions::Snow);
    }

    #[rstest]
    #[case("10 to 15 mph", 10)]
    #[case("5 mph", 5)]
    #[case("calm", 0)]
    #[case("", 0)]
    #[case("around 20 mph", 20)]
    fn test_extract_wind_speed(#[case] text: &str, #[case] expected: i64) {
        assert_eq!(extract_wind_speed(text), expected);
    }

    #[test]
    fn test_fahrenheit_to_celsius_rounding() {
        // 55°F is 12.777...°C; one decimal place
        assert_eq!(fahrenheit_to_celsius(55.0), 12.8);
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(fahrenheit_to_celsius(-40.0), -40.0);
        assert_eq!(fahrenheit_to_celsius(100.0), 37.8);
        // Rounding pinned to half-away-from-zero on the scaled value
        assert_eq!((12.75_f64 * 10.0).round() / 10.0, 12.8);
        assert_eq!((-12.75_f64 * 10.0).round() / 10.0, -12.8);
    }

    fn point_properties(value: serde_json::Value) -> wire::PointsProperties {
        serde_json::from_value(value).unwrap()
    }

    fn forecast_properties(value: serde_json::Value) -> wire::ForecastProperties {
        serde_json::from_value(value).unwrap()
    }

    fn sample_points() -> wire::PointsProperties {
        point_properties(json!({
            "forecast": "https://api.weather.gov/gridpoints/MTR/85,105/forecast",
            "relativeLocation": {
                "properties": { "city": "San Francisco", "state": "CA" }
            }
        }))
    }

    fn sample_period(name: &str, temperature: f64, detailed: &str) -> serde_json::Value {
        json!({
            "name": name,
            "temperature": temperature,
            "temperatureUnit": "F",
            "windSpeed": "10 to 15 mph",
            "windDirection": "NW",
            "detailedForecast": detailed
        })
    }

    #[test]
    fn test_normalize_forecast_full_report() {
        let forecast = forecast_properties(json!({
            "periods": [
                sample_period("This Afternoon", 55.0, "Mostly cloudy with rain showers."),
                sample_period("Tonight", 48.0, "Clear skies."),
            ]
        }));
        let coordinate = Coordinate::new(37.7749295, -122.4194155);

        let Outcome::Ok(report) = normalize_forecast(&sample_points(), forecast, coordinate) else {
            panic!("expected a successful forecast");
        };

        assert_eq!(report.temperature_fahrenheit, 55.0);
        assert_eq!(report.temperature_celsius, 12.8);
        assert_eq!(report.conditions, Conditions::Rain);
        assert_eq!(report.wind_speed_mph, 10);
        assert_eq!(report.wind_speed_text, "10 to 15 mph");
        assert_eq!(report.wind_direction, "NW");
        assert_eq!(report.location_name, "San Francisco, CA");
        assert_eq!(report.periods.len(), 2);
        // Every period carries the current period's tag
        assert!(report.periods.iter().all(|p| p.conditions == Conditions::Rain));
        assert_eq!(report.periods[1].name, "Tonight");
    }

    #[test]
    fn test_normalize_forecast_truncates_periods() {
        let periods: Vec<_> = (0..14)
            .map(|i| sample_period(&format!("Period {i}"), 60.0, "Sunny."))
            .collect();
        let forecast = forecast_properties(json!({ "periods": periods }));

        let Outcome::Ok(report) =
            normalize_forecast(&sample_points(), forecast, Coordinate::new(37.77, -122.42))
        else {
            panic!("expected a successful forecast");
        };
        assert_eq!(report.periods.len(), MAX_PERIODS);
        assert_eq!(report.periods[0].name, "Period 0");
        assert_eq!(report.periods[4].name, "Period 4");
    }

    #[test]
    fn test_normalize_forecast_empty_periods_is_malformed() {
        let forecast = forecast_properties(json!({ "periods": [] }));
        let outcome =
            normalize_forecast(&sample_points(), forecast, Coordinate::new(37.77, -122.42));
        assert!(matches!(
            outcome,
            Outcome::Error {
                kind: ErrorKind::MalformedResponse,
                ..
            }
        ));
    }

    #[test]
    fn test_location_label_falls_back_to_coordinates() {
        let points = point_properties(json!({
            "forecast": "https://api.weather.gov/gridpoints/MTR/85,105/forecast"
        }));
        let forecast = forecast_properties(json!({
            "periods": [ sample_period("Tonight", 40.0, "Clear.") ]
        }));

        let Outcome::Ok(report) =
            normalize_forecast(&points, forecast, Coordinate::new(37.77, -122.42))
        else {
            panic!("expected a successful forecast");
        };
        assert_eq!(report.location_name, "37.77, -122.42");
    }

    fn alerts_from(value: serde_json::Value) -> wire::Alerts {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_alerts_missing_features_is_error() {
        let outcome = normalize_alerts(alerts_from(json!({})));
        assert!(matches!(
            outcome,
            Outcome::Error {
                kind: ErrorKind::MalformedResponse,
                ..
            }
        ));
    }

    #[test]
    fn test_alerts_empty_features_is_explicit_empty() {
        let outcome = normalize_alerts(alerts_from(json!({ "features": [] })));
        assert!(matches!(outcome, Outcome::Empty { .. }));
        if let Outcome::Empty { message } = outcome {
            assert_eq!(message, "No active alerts for this state.");
        }
    }

    #[test]
    fn test_alerts_preserve_order_and_count() {
        let outcome = normalize_alerts(alerts_from(json!({
            "features": [
                { "properties": { "event": "Flood Warning", "areaDesc": "Sonoma", "severity": "Severe",
                                  "description": "River flooding.", "instruction": "Move to higher ground." } },
                { "properties": { "event": "Wind Advisory", "areaDesc": "Marin", "severity": "Moderate",
                                  "description": "Gusty winds.", "instruction": "Secure loose objects." } }
            ]
        })));

        let Outcome::Ok(report) = outcome else {
            panic!("expected alerts");
        };
        assert_eq!(report.count, 2);
        assert_eq!(report.alerts[0].event, "Flood Warning");
        assert_eq!(report.alerts[1].event, "Wind Advisory");
    }

    #[test]
    fn test_alert_field_fallbacks() {
        let outcome = normalize_alerts(alerts_from(json!({
            "features": [ { "properties": {} } ]
        })));

        let Outcome::Ok(report) = outcome else {
            panic!("expected alerts");
        };
        let alert = &report.alerts[0];
        assert_eq!(alert.event, "Unknown");
        assert_eq!(alert.area, "Unknown");
        assert_eq!(alert.severity, "Unknown");
        assert_eq!(alert.description, "No description available");
        assert_eq!(alert.instructions, "No specific instructions provided");
    }
}
