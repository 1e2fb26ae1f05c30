//! `Nimbus` - weather assistant tool backend
//!
//! This library provides the leaf operations an LLM-driven weather assistant
//! calls through its tool-invocation transport: geocoding via OpenStreetMap
//! Nominatim, forecasts and alerts via the US National Weather Service, and
//! the human-in-the-loop confirmation contract the orchestrator must resolve
//! before fetching weather data.

pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod models;
pub mod nws;
pub mod outcome;
pub mod tools;
pub mod web;

// Re-export core types for public API
pub use agent::AgentProfile;
pub use client::UpstreamClient;
pub use config::NimbusConfig;
pub use error::NimbusError;
pub use geocoding::GeocodingClient;
pub use models::{
    AlertReport, AlertSummary, Conditions, ConfirmationOption, ConfirmationRequest, Coordinate,
    ForecastReport, GeocodeResult, PeriodSummary,
};
pub use nws::NwsClient;
pub use outcome::{ErrorKind, Outcome};
pub use tools::{Tool, ToolDeclaration, ToolRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, NimbusError>;
