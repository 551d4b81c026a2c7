//! Per-stop timetable of the final route.

use serde::{Deserialize, Serialize};

use crate::config::Constraints;
use crate::feasibility::RouteWalk;
use crate::matrix::DistanceMatrix;
use crate::model::Stop;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub order_index: usize,
    pub travel_minutes_from_prev: i32,
    /// Arrival before any lunch or time-window wait.
    pub arrival_time_minutes: i32,
    pub planned_start_minutes: i32,
    pub planned_end_minutes: i32,
    /// Minutes from the shift start to the planned start.
    pub eta_minutes_from_shift_start: i32,
}

/// Replays the route with the same rules as feasibility checking and records
/// when each stop is reached, started and finished.
pub fn calculate_schedule(
    route: &[usize],
    stops: &[Stop],
    matrix: &DistanceMatrix,
    constraints: &Constraints,
) -> Vec<ScheduleEntry> {
    RouteWalk::new(route, stops, matrix, constraints)
        .enumerate()
        .map(|(order_index, timing)| ScheduleEntry {
            order_index,
            travel_minutes_from_prev: timing.travel,
            arrival_time_minutes: timing.arrival,
            planned_start_minutes: timing.start,
            planned_end_minutes: timing.end,
            eta_minutes_from_shift_start: timing.start.saturating_sub(constraints.shift_start_minutes),
        })
        .collect()
}
