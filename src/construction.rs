//! Seed route: must-visit stops in window order, then cheapest insertion.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::matrix::DistanceMatrix;
use crate::model::Route;
use crate::objective::RouteContext;
use crate::scoring::stop_score;

/// Result of the construction phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialRoute {
    pub route: Route,
    /// Must-visit stops left out because appending them overflowed the shift.
    pub dropped_must_visit: Vec<usize>,
}

/// Builds the starting route for local search.
///
/// Must-visit stops are appended in ascending time-window start (absent
/// counts as 0) as long as the route still ends within the shift; a stop
/// that would overflow is dropped and never reconsidered. Optional stops
/// are then inserted by global cheapest insertion until `max_stops` is
/// reached, with candidates scanned in descending score so that ties go to
/// the more desirable stop.
pub fn build_initial_route(context: &RouteContext<'_>) -> InitialRoute {
    let stops = context.stops;
    let constraints = context.constraints;

    let (mut must_visit, mut optional): (Vec<usize>, Vec<usize>) =
        (0..stops.len()).partition(|&i| stops[i].is_must_visit());

    must_visit.sort_by_key(|&i| stops[i].time_window_start_minutes.unwrap_or(0));

    let mut route: Route = Vec::with_capacity(constraints.max_stops.max(must_visit.len()));
    let mut dropped_must_visit = Vec::new();

    for index in must_visit {
        route.push(index);
        let finish = constraints
            .shift_start_minutes
            .saturating_add(context.feasibility(&route).stats.total_time);
        if finish > constraints.shift_end_minutes {
            route.pop();
            warn!(
                stop_id = %stops[index].id,
                finish,
                "must-visit stop overflows the shift, dropping it from the initial route"
            );
            dropped_must_visit.push(index);
        }
    }

    let scores: Vec<f64> = stops.iter().map(|stop| stop_score(stop, context.weights)).collect();
    optional.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    while route.len() < constraints.max_stops && !optional.is_empty() {
        let mut best: Option<(usize, usize, i32)> = None;

        for (slot, &candidate) in optional.iter().enumerate() {
            for position in 0..=route.len() {
                let cost = insertion_cost(context.matrix, &route, candidate, position);
                if best.is_none_or(|(_, _, best_cost)| cost < best_cost) {
                    best = Some((slot, position, cost));
                }
            }
        }

        let Some((slot, position, cost)) = best else {
            break;
        };
        let candidate = optional.remove(slot);
        debug!(
            stop_id = %stops[candidate].id,
            position,
            cost,
            "inserted optional stop"
        );
        route.insert(position, candidate);
    }

    InitialRoute {
        route,
        dropped_must_visit,
    }
}

/// Travel minutes charged for inserting `candidate` before `route[position]`.
///
/// Between two stops this is the detour; at either end of the route it is
/// the direct leg from the start point or from the current last stop.
fn insertion_cost(matrix: &DistanceMatrix, route: &[usize], candidate: usize, position: usize) -> i32 {
    if position == 0 {
        return matrix.from_start(candidate);
    }

    let previous = route[position - 1];
    match route.get(position) {
        Some(&next) => {
            matrix.get(previous, candidate) + matrix.get(candidate, next) - matrix.get(previous, next)
        }
        None => matrix.get(previous, candidate),
    }
}
