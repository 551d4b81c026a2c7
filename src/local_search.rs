//! Steepest-descent improvement with 2-opt, or-opt and swap neighborhoods.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::model::Route;
use crate::objective::RouteContext;

/// Smallest objective drop that counts as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Longest contiguous chain or-opt relocates.
const MAX_CHAIN_LEN: usize = 3;

/// A neighborhood scan: returns the best strictly improving route, if any.
type Operator = fn(&[usize], f64, &RouteContext<'_>) -> Option<(Route, f64)>;

const OPERATORS: [Operator; 3] = [two_opt, or_opt, swap];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The no-improvement budget ran out.
    Converged,
    /// The wall-clock budget ran out.
    TimeBudget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    pub route: Route,
    pub objective: f64,
    pub iterations: usize,
    pub improving_iterations: usize,
    pub stop_reason: StopReason,
}

/// Improves `route` until `max_iterations` consecutive iterations fail to
/// improve it or `max_optimization_time_ms` elapses.
///
/// Each iteration runs a full best-improvement scan of 2-opt, or-opt and
/// swap in that order. Only strictly improving moves are applied, so the
/// returned objective is never worse than the input's. The time budget is
/// checked between iterations, never inside a scan.
pub fn optimize_route(route: Route, context: &RouteContext<'_>, config: &EngineConfig) -> OptimizationOutcome {
    let started = Instant::now();
    let budget = Duration::from_millis(config.max_optimization_time_ms);

    let mut best_cost = context.objective(&route);
    let mut best = route;
    let mut no_improvement = 0;
    let mut iterations = 0;
    let mut improving_iterations = 0;

    let stop_reason = loop {
        if no_improvement >= config.max_iterations {
            break StopReason::Converged;
        }
        if started.elapsed() >= budget {
            break StopReason::TimeBudget;
        }
        iterations += 1;

        let mut improved = false;
        for operator in OPERATORS {
            if let Some((candidate, cost)) = operator(&best, best_cost, context) {
                best = candidate;
                best_cost = cost;
                improved = true;
            }
        }

        if improved {
            no_improvement = 0;
            improving_iterations += 1;
        } else {
            no_improvement += 1;
        }

        debug!(iteration = iterations, objective = best_cost, improved, "local search iteration");
    };

    OptimizationOutcome {
        route: best,
        objective: best_cost,
        iterations,
        improving_iterations,
        stop_reason,
    }
}

/// Tracks the best strictly improving candidate of one neighborhood scan.
/// The first candidate reaching a given cost wins ties.
struct BestMove {
    cost: f64,
    route: Option<Route>,
}

impl BestMove {
    fn new(current_cost: f64) -> Self {
        Self {
            cost: current_cost,
            route: None,
        }
    }

    fn offer(&mut self, candidate: Route, context: &RouteContext<'_>) {
        let cost = context.objective(&candidate);
        if cost < self.cost - IMPROVEMENT_EPSILON {
            self.cost = cost;
            self.route = Some(candidate);
        }
    }

    fn finish(self) -> Option<(Route, f64)> {
        self.route.map(|route| (route, self.cost))
    }
}

/// Reverses `route[i..=j]` for every `j >= i + 2`.
pub fn two_opt(route: &[usize], current_cost: f64, context: &RouteContext<'_>) -> Option<(Route, f64)> {
    let n = route.len();
    if n < 3 {
        return None;
    }

    let mut best = BestMove::new(current_cost);
    for i in 0..n - 2 {
        for j in i + 2..n {
            let mut candidate = route.to_vec();
            candidate[i..=j].reverse();
            best.offer(candidate, context);
        }
    }
    best.finish()
}

/// Relocates every chain of 1 to 3 consecutive stops to every other position.
pub fn or_opt(route: &[usize], current_cost: f64, context: &RouteContext<'_>) -> Option<(Route, f64)> {
    let n = route.len();
    let mut best = BestMove::new(current_cost);

    for chain_len in 1..=MAX_CHAIN_LEN.min(n.saturating_sub(1)) {
        for start in 0..=n - chain_len {
            let chain = &route[start..start + chain_len];
            let remainder: Vec<usize> = route[..start]
                .iter()
                .chain(&route[start + chain_len..])
                .copied()
                .collect();

            for position in 0..=remainder.len() {
                if position == start {
                    continue;
                }
                let mut candidate = Vec::with_capacity(n);
                candidate.extend_from_slice(&remainder[..position]);
                candidate.extend_from_slice(chain);
                candidate.extend_from_slice(&remainder[position..]);
                best.offer(candidate, context);
            }
        }
    }
    best.finish()
}

/// Exchanges every pair of stops.
pub fn swap(route: &[usize], current_cost: f64, context: &RouteContext<'_>) -> Option<(Route, f64)> {
    let n = route.len();
    let mut best = BestMove::new(current_cost);

    for i in 0..n {
        for j in i + 1..n {
            let mut candidate = route.to_vec();
            candidate.swap(i, j);
            best.offer(candidate, context);
        }
    }
    best.finish()
}
