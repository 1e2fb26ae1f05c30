//! Data models for the `Nimbus` backend
//!
//! This module contains the core domain models organized by concern:
//! - Location: coordinates and geocoding results
//! - Forecast: normalized forecast reports and periods
//! - Alerts: active alert reports
//! - Confirmation: the human-in-the-loop contract

pub mod alerts;
pub mod confirmation;
pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use alerts::{AlertReport, AlertSummary};
pub use confirmation::{ConfirmationOption, ConfirmationRequest, OptionStatus, WeatherAction};
pub use forecast::{Conditions, ForecastReport, PeriodSummary};
pub use location::{Coordinate, GeocodeResult};
