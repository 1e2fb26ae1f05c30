//! Location models produced by geocoding and consumed by forecast lookup

use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Round both components to the given number of decimal places.
    /// The NWS grid lookup is sensitive to coordinate precision.
    #[must_use]
    pub fn rounded(&self, precision: u32) -> Self {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        Self {
            latitude: (self.latitude * multiplier).round() / multiplier,
            longitude: (self.longitude * multiplier).round() / multiplier,
        }
    }

    /// Format as a "lat, lon" pair for display fallbacks
    #[must_use]
    pub fn display_pair(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}

/// Best match returned by the geocoding lookup, passed through verbatim from
/// the upstream payload
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Latitude of the best match
    pub latitude: f64,
    /// Longitude of the best match
    pub longitude: f64,
    /// Human-readable display name
    pub display_name: String,
    /// Coarse location-type tag from the upstream ("city", "administrative", ...)
    pub location_type: String,
    /// Relevance score of the match
    pub importance: f64,
}

impl GeocodeResult {
    /// The coordinate of this match
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
