//! Scalar route cost minimized by construction and local search.

use crate::config::{Constraints, Weights};
use crate::feasibility::{Feasibility, check_feasibility};
use crate::matrix::DistanceMatrix;
use crate::model::Stop;

/// Travel minutes plus lateness/overtime penalties minus the priority reward.
/// Lower is better.
///
/// Penalties are soft: an infeasible route still gets a finite cost, it is
/// just priced far above a feasible one with similar travel.
pub fn objective(
    route: &[usize],
    stops: &[Stop],
    matrix: &DistanceMatrix,
    constraints: &Constraints,
    weights: &Weights,
) -> f64 {
    let feasibility = check_feasibility(route, stops, matrix, constraints);
    objective_from(&feasibility, route, stops, weights)
}

/// Same as [`objective`] for a route whose feasibility is already known.
pub fn objective_from(
    feasibility: &Feasibility,
    route: &[usize],
    stops: &[Stop],
    weights: &Weights,
) -> f64 {
    let stats = &feasibility.stats;
    let priority_sum: f64 = route
        .iter()
        .map(|&i| f64::from(stops[i].effective_priority()))
        .sum();

    f64::from(stats.total_travel_minutes)
        + weights.lateness_penalty * f64::from(stats.total_lateness)
        + weights.overtime_penalty * f64::from(stats.overtime)
        - weights.priority_reward * priority_sum
}

/// Borrowed inputs shared by every route evaluation in one run.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub stops: &'a [Stop],
    pub matrix: &'a DistanceMatrix,
    pub constraints: &'a Constraints,
    pub weights: &'a Weights,
}

impl<'a> RouteContext<'a> {
    pub fn new(
        stops: &'a [Stop],
        matrix: &'a DistanceMatrix,
        constraints: &'a Constraints,
        weights: &'a Weights,
    ) -> Self {
        Self {
            stops,
            matrix,
            constraints,
            weights,
        }
    }

    pub fn feasibility(&self, route: &[usize]) -> Feasibility {
        check_feasibility(route, self.stops, self.matrix, self.constraints)
    }

    pub fn objective(&self, route: &[usize]) -> f64 {
        objective(route, self.stops, self.matrix, self.constraints, self.weights)
    }
}
