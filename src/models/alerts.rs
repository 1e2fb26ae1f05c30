//! Active weather alert models

use serde::{Deserialize, Serialize};

/// One active alert, with fixed placeholder text where the upstream omitted a
/// field
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AlertSummary {
    /// Alert event name ("Flood Warning")
    pub event: String,
    /// Affected area description
    pub area: String,
    /// Severity as reported upstream
    pub severity: String,
    /// Narrative description
    pub description: String,
    /// Safety instructions
    pub instructions: String,
}

/// All active alerts for a region
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AlertReport {
    /// Alerts in upstream order
    pub alerts: Vec<AlertSummary>,
    /// Always equal to `alerts.len()`
    pub count: usize,
}

impl AlertReport {
    /// Create a report; the count is derived, never supplied
    #[must_use]
    pub fn new(alerts: Vec<AlertSummary>) -> Self {
        let count = alerts.len();
        Self { alerts, count }
    }
}
