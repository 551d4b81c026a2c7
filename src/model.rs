//! Input records for the route planner.
//!
//! Stops are plain data: every optional attribute is an `Option` and the
//! engine branches on presence explicitly.

use serde::{Deserialize, Serialize};

/// Priority assumed when a stop does not carry one.
pub const DEFAULT_PRIORITY: u8 = 3;

/// An ordered sequence of indices into the eligible-stop list.
pub type Route = Vec<usize>;

/// A candidate location the worker may visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stop {
    /// Caller-supplied identifier, echoed back untouched.
    pub id: String,
    #[serde(alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
    /// Mandatory stop (e.g. a confirmed appointment).
    pub must_visit: Option<bool>,
    pub do_not_contact: Option<bool>,
    pub routing_eligible: Option<bool>,
    /// 1 (low) to 5 (high).
    pub priority: Option<u8>,
    /// Minutes since midnight.
    pub time_window_start_minutes: Option<i32>,
    /// Minutes since midnight.
    pub time_window_end_minutes: Option<i32>,
    pub service_duration_minutes: Option<i32>,
    pub days_since_last_touch: Option<f64>,
    pub deal_value: Option<f64>,
    pub max_deal_value: Option<f64>,
}

impl Stop {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    /// Coordinates as (lat, lng) when both are present and finite.
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }

    /// Coordinates of a stop that already passed eligibility filtering.
    ///
    /// Falls back to (0, 0) rather than panicking; filtering guarantees the
    /// fallback is never hit for stops handed to the engine.
    pub(crate) fn location(&self) -> (f64, f64) {
        self.coords().unwrap_or((0.0, 0.0))
    }

    pub fn is_must_visit(&self) -> bool {
        self.must_visit.unwrap_or(false)
    }

    pub fn effective_priority(&self) -> u8 {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn service_minutes(&self, default_minutes: i32) -> i32 {
        self.service_duration_minutes.unwrap_or(default_minutes)
    }
}

/// The worker's shift start location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartPoint {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl StartPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Formats minutes since midnight as `HH:MM`.
pub fn format_minutes(minutes: i32) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}
