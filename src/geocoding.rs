//! Geocoding lookup against OpenStreetMap Nominatim
//!
//! One request, best match only. Zero matches and upstream failures both
//! degrade to a typed outcome carrying a human-readable message; this lookup
//! never raises to the tool transport.

use tracing::{info, instrument, warn};

use crate::client::UpstreamClient;
use crate::models::GeocodeResult;
use crate::outcome::{ErrorKind, Outcome};

/// Default Nominatim endpoint
pub const NOMINATIM_BASE: &str = "https://nominatim.openstreetmap.org";

const ACCEPT_JSON: &str = "application/json";

/// `Nominatim` API response structures; only the fields the assistant consumes
mod nominatim {
    use serde::Deserialize;

    /// One search match. Coordinates arrive as strings.
    #[derive(Debug, Deserialize)]
    pub struct SearchMatch {
        pub lat: String,
        pub lon: String,
        pub display_name: Option<String>,
        #[serde(rename = "type")]
        pub location_type: Option<String>,
        pub importance: Option<f64>,
    }
}

/// Client for the Nominatim search API
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: UpstreamClient,
    base_url: String,
}

impl GeocodingClient {
    /// Create a client against the given base URL
    #[must_use]
    pub fn new<S: Into<String>>(http: UpstreamClient, base_url: S) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Resolve a free-text place description to its best-matching coordinate
    #[instrument(skip(self))]
    pub async fn geocode(&self, location: &str) -> Outcome<GeocodeResult> {
        // Single best match, with address details for a richer display name
        let url = format!(
            "{}/search?q={}&format=json&limit=1&addressdetails=1",
            self.base_url,
            urlencoding::encode(location)
        );

        let matches: Vec<nominatim::SearchMatch> = match self.http.get_json(&url, ACCEPT_JSON).await
        {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Nominatim request for '{location}' failed: {e}");
                let kind = if e.is_malformed() {
                    ErrorKind::MalformedResponse
                } else {
                    ErrorKind::UpstreamUnavailable
                };
                return Outcome::error(kind, not_found_message(location));
            }
        };

        normalize_matches(location, matches)
    }
}

fn not_found_message(location: &str) -> String {
    format!(
        "Could not find location: {location}. Please try a different location name or be more specific."
    )
}

/// Reshape the match list into the typed result, taking the first
/// (best-ranked) entry
fn normalize_matches(
    location: &str,
    matches: Vec<nominatim::SearchMatch>,
) -> Outcome<GeocodeResult> {
    let Some(best) = matches.into_iter().next() else {
        info!("No geocoding matches for '{location}'");
        return Outcome::error(ErrorKind::NotFound, not_found_message(location));
    };

    let (Ok(latitude), Ok(longitude)) = (best.lat.parse::<f64>(), best.lon.parse::<f64>()) else {
        warn!("Geocoding match for '{location}' carried unparseable coordinates");
        return Outcome::error(
            ErrorKind::MalformedResponse,
            "Geocoding result carried unparseable coordinates.",
        );
    };

    info!("Geocoded '{location}' to ({latitude}, {longitude})");

    Outcome::Ok(GeocodeResult {
        latitude,
        longitude,
        display_name: best.display_name.unwrap_or_else(|| location.to_string()),
        location_type: best.location_type.unwrap_or_else(|| "unknown".to_string()),
        importance: best.importance.unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matches_from(value: serde_json::Value) -> Vec<nominatim::SearchMatch> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_best_match_passes_through_verbatim() {
        let matches = matches_from(json!([
            {
                "lat": "37.7792588",
                "lon": "-122.4193286",
                "display_name": "San Francisco, California, United States",
                "type": "city",
                "importance": 0.9175
            },
            {
                "lat": "0.0",
                "lon": "0.0",
                "display_name": "Somewhere else",
                "type": "hamlet",
                "importance": 0.1
            }
        ]));

        let Outcome::Ok(result) = normalize_matches("San Francisco", matches) else {
            panic!("expected a successful geocode");
        };
        assert_eq!(result.latitude, 37.7792588);
        assert_eq!(result.longitude, -122.4193286);
        assert_eq!(
            result.display_name,
            "San Francisco, California, United States"
        );
        assert_eq!(result.location_type, "city");
        assert_eq!(result.importance, 0.9175);
    }

    #[test]
    fn test_missing_optional_fields_get_defaults() {
        let matches = matches_from(json!([
            { "lat": "51.5", "lon": "-0.12" }
        ]));

        let Outcome::Ok(result) = normalize_matches("London", matches) else {
            panic!("expected a successful geocode");
        };
        assert_eq!(result.display_name, "London");
        assert_eq!(result.location_type, "unknown");
        assert_eq!(result.importance, 0.0);
    }

    #[test]
    fn test_zero_matches_is_not_found() {
        let outcome = normalize_matches("Atlantis", Vec::new());
        assert!(matches!(
            outcome,
            Outcome::Error {
                kind: ErrorKind::NotFound,
                ..
            }
        ));
        if let Outcome::Error { message, .. } = outcome {
            assert!(message.contains("Atlantis"));
        }
    }

    #[test]
    fn test_unparseable_coordinates_are_malformed() {
        let matches = matches_from(json!([
            { "lat": "not-a-number", "lon": "-0.12" }
        ]));
        let outcome = normalize_matches("London", matches);
        assert!(matches!(
            outcome,
            Outcome::Error {
                kind: ErrorKind::MalformedResponse,
                ..
            }
        ));
    }
}
