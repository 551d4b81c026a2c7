//! Caller-tunable constraints, weights and engine settings.
//!
//! Every struct merges over its `Default` field by field when deserialized,
//! so callers only send the keys they want to override.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Work-shift constraints. All times are minutes since midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    pub shift_start_minutes: i32,
    pub shift_end_minutes: i32,
    pub lunch_break_start: i32,
    pub lunch_break_duration: i32,
    /// Used for stops that do not carry their own duration.
    pub service_duration_minutes: i32,
    pub max_stops: usize,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            shift_start_minutes: 8 * 60,
            shift_end_minutes: 17 * 60,
            lunch_break_start: 12 * 60,
            lunch_break_duration: 30,
            service_duration_minutes: 30,
            max_stops: 12,
        }
    }
}

impl Constraints {
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.shift_start_minutes >= self.shift_end_minutes {
            return Err(PlanError::InvalidShift {
                start: self.shift_start_minutes,
                end: self.shift_end_minutes,
            });
        }
        Ok(())
    }

    pub fn lunch_break_end(&self) -> i32 {
        self.lunch_break_start.saturating_add(self.lunch_break_duration)
    }

    /// True when `time` falls inside `[lunch start, lunch end)`.
    pub fn in_lunch_break(&self, time: i32) -> bool {
        time >= self.lunch_break_start && time < self.lunch_break_end()
    }

    /// Hour of day the shift starts in, used to pick the congestion band.
    pub fn start_hour(&self) -> u32 {
        (self.shift_start_minutes.div_euclid(60)).rem_euclid(24) as u32
    }
}

/// Scoring coefficients and objective penalty/reward magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Weights {
    pub priority_weight: f64,
    pub recency_weight: f64,
    pub value_weight: f64,
    /// Cost per minute of arriving after a time window closes.
    pub lateness_penalty: f64,
    /// Cost per minute of finishing past the shift end.
    pub overtime_penalty: f64,
    /// Reward per priority point of every visited stop.
    pub priority_reward: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            priority_weight: 0.5,
            recency_weight: 0.3,
            value_weight: 0.2,
            lateness_penalty: 50.0,
            overtime_penalty: 20.0,
            priority_reward: 5.0,
        }
    }
}

/// A named time-of-day band with its own congestion multiplier.
///
/// Matches hours in `[start_hour, end_hour)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CongestionBand {
    pub name: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub multiplier: f64,
}

impl CongestionBand {
    pub fn new(name: impl Into<String>, start_hour: u32, end_hour: u32, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            start_hour,
            end_hour,
            multiplier,
        }
    }

    pub fn contains(&self, hour_of_day: u32) -> bool {
        hour_of_day >= self.start_hour && hour_of_day < self.end_hour
    }
}

/// Engine-wide settings, read-only for one plan generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Average driving speed in km/h before congestion.
    pub average_speed_kmh: f64,
    pub congestion_bands: Vec<CongestionBand>,
    /// Multiplier used when no band matches.
    pub default_multiplier: f64,
    /// Wall-clock budget for local search.
    pub max_optimization_time_ms: u64,
    /// Consecutive non-improving iterations before local search stops.
    pub max_iterations: usize,
    /// Charge travel from the start point to the first stop when walking a route.
    pub count_start_leg: bool,
    pub engine_version: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 40.0,
            congestion_bands: vec![
                CongestionBand::new("morning_rush", 7, 9, 1.4),
                CongestionBand::new("evening_rush", 16, 19, 1.5),
            ],
            default_multiplier: 1.0,
            max_optimization_time_ms: 2_000,
            max_iterations: 25,
            count_start_leg: false,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl EngineConfig {
    /// First band containing `hour_of_day` wins; otherwise the default multiplier.
    pub fn congestion_multiplier(&self, hour_of_day: u32) -> f64 {
        self.congestion_bands
            .iter()
            .find(|band| band.contains(hour_of_day))
            .map(|band| band.multiplier)
            .unwrap_or(self.default_multiplier)
    }
}
