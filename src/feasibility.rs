//! Time simulation of an ordered route against shift, lunch and time windows.
//!
//! The same walk drives feasibility checking and the final schedule, so the
//! two can never disagree on when a stop starts.

use serde::{Deserialize, Serialize};

use crate::config::Constraints;
use crate::matrix::DistanceMatrix;
use crate::model::Stop;

/// Timing of one visited stop as produced by [`RouteWalk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StopTiming {
    /// Index into the eligible-stop list.
    pub stop: usize,
    pub travel: i32,
    /// Time the worker reaches the stop, before lunch or window waits.
    pub arrival: i32,
    pub start: i32,
    pub end: i32,
    pub service: i32,
    /// Minutes past the time-window end at service start (0 when on time).
    pub lateness: i32,
}

/// Iterator replaying a route from the shift start.
pub(crate) struct RouteWalk<'a> {
    route: &'a [usize],
    stops: &'a [Stop],
    matrix: &'a DistanceMatrix,
    constraints: &'a Constraints,
    position: usize,
    time: i32,
}

impl<'a> RouteWalk<'a> {
    pub fn new(
        route: &'a [usize],
        stops: &'a [Stop],
        matrix: &'a DistanceMatrix,
        constraints: &'a Constraints,
    ) -> Self {
        Self {
            route,
            stops,
            matrix,
            constraints,
            position: 0,
            time: constraints.shift_start_minutes,
        }
    }
}

impl Iterator for RouteWalk<'_> {
    type Item = StopTiming;

    fn next(&mut self) -> Option<StopTiming> {
        let &index = self.route.get(self.position)?;
        let previous = self.position.checked_sub(1).map(|p| self.route[p]);
        self.position += 1;

        let stop = &self.stops[index];
        let travel = self.matrix.leg(previous, index);
        let arrival = self.time.saturating_add(travel);
        let mut time = arrival;

        if self.constraints.in_lunch_break(time) {
            time = self.constraints.lunch_break_end();
        }

        if let Some(window_start) = stop.time_window_start_minutes {
            time = time.max(window_start);
        }

        let lateness = match stop.time_window_end_minutes {
            Some(window_end) if time > window_end => time.saturating_sub(window_end),
            _ => 0,
        };

        let service = stop.service_minutes(self.constraints.service_duration_minutes);
        let start = time;
        self.time = start.saturating_add(service);

        Some(StopTiming {
            stop: index,
            travel,
            arrival,
            start,
            end: self.time,
            service,
            lateness,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    TimeWindowLate,
    Overtime,
}

/// A soft-constraint breach found while walking a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub kind: ViolationKind,
    /// Position of the stop in the route.
    pub stop_index: usize,
    pub stop_id: String,
    /// Minutes late, or minutes past the shift end.
    pub minutes: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteStats {
    pub total_travel_minutes: i32,
    pub total_service_minutes: i32,
    /// Minutes from shift start to the end of the last service.
    pub total_time: i32,
    pub total_lateness: i32,
    /// Overage of the last stop that finished past the shift end.
    pub overtime: i32,
    pub feasibility_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feasibility {
    pub feasible: bool,
    pub violations: Vec<Violation>,
    pub stats: RouteStats,
}

/// Walks `route` from the shift start and reports lateness and overtime.
///
/// Overtime is re-captured at every stop that ends past the shift, so the
/// reported value is the last stop's overage.
pub fn check_feasibility(
    route: &[usize],
    stops: &[Stop],
    matrix: &DistanceMatrix,
    constraints: &Constraints,
) -> Feasibility {
    let mut violations = Vec::new();
    let mut stats = RouteStats::default();
    let mut finish = constraints.shift_start_minutes;

    for (position, timing) in RouteWalk::new(route, stops, matrix, constraints).enumerate() {
        let stop_id = &stops[timing.stop].id;
        stats.total_travel_minutes = stats.total_travel_minutes.saturating_add(timing.travel);
        stats.total_service_minutes = stats.total_service_minutes.saturating_add(timing.service);

        if timing.lateness > 0 {
            stats.total_lateness = stats.total_lateness.saturating_add(timing.lateness);
            violations.push(Violation {
                kind: ViolationKind::TimeWindowLate,
                stop_index: position,
                stop_id: stop_id.clone(),
                minutes: timing.lateness,
            });
        }

        if timing.end > constraints.shift_end_minutes {
            stats.overtime = timing.end.saturating_sub(constraints.shift_end_minutes);
            violations.push(Violation {
                kind: ViolationKind::Overtime,
                stop_index: position,
                stop_id: stop_id.clone(),
                minutes: stats.overtime,
            });
        }

        finish = timing.end;
    }

    stats.total_time = finish.saturating_sub(constraints.shift_start_minutes);
    stats.feasibility_score = if violations.is_empty() {
        1.0
    } else {
        (1.0 - violations.len() as f64 / route.len() as f64).max(0.0)
    };

    Feasibility {
        feasible: violations.is_empty() && stats.overtime == 0,
        violations,
        stats,
    }
}
