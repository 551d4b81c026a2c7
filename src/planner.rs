//! Plan orchestration: filter, build, improve, schedule and report.

use std::collections::HashSet;
use std::time::Instant;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{Constraints, EngineConfig, Weights};
use crate::construction::build_initial_route;
use crate::error::PlanError;
use crate::feasibility::{Feasibility, RouteStats};
use crate::haversine::HaversineMatrix;
use crate::local_search::{StopReason, optimize_route};
use crate::matrix::DistanceMatrix;
use crate::model::{StartPoint, Stop, format_minutes};
use crate::objective::{RouteContext, objective_from};
use crate::schedule::{ScheduleEntry, calculate_schedule};
use crate::traits::DistanceMatrixProvider;

/// Everything one plan generation needs. Constraints, weights and config
/// fall back to their defaults when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub stops: Vec<Stop>,
    pub start_point: StartPoint,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub config: EngineConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    MissingCoordinates,
    DoNotContact,
    NotRoutingEligible,
}

/// A stop removed before routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedStop {
    pub stop_id: String,
    pub reason: ExclusionReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnroutedReason {
    /// Must-visit stop that did not fit in the shift during construction.
    ShiftOverflow,
    /// Optional stop that was not inserted.
    NotSelected,
}

/// An eligible stop that did not make it onto the final route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnroutedStop {
    pub stop_id: String,
    pub reason: UnroutedReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStop {
    pub stop: Stop,
    pub schedule: ScheduleEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanStats {
    #[serde(flatten)]
    pub route: RouteStats,
    pub objective: f64,
    pub total_stops: usize,
    pub excluded_stops: usize,
    pub optimization_time_ms: u64,
    pub engine_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Diagnostics {
    pub candidate_pool_size: usize,
    pub excluded_stops: Vec<ExcludedStop>,
    pub unrouted_stops: Vec<UnroutedStop>,
    pub feasibility: Feasibility,
    pub hour_of_day: u32,
    pub initial_objective: f64,
    pub iterations: usize,
    pub improving_iterations: usize,
    pub stop_reason: Option<StopReason>,
}

/// The returned plan. Built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub route: Vec<PlannedStop>,
    #[serde(default, serialize_with = "empty_when_default")]
    pub stats: PlanStats,
    #[serde(default, serialize_with = "empty_when_default")]
    pub diagnostics: Diagnostics,
}

/// Writes `{}` for a value that was never filled in, as on a failed plan.
fn empty_when_default<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize + Default + PartialEq,
    S: Serializer,
{
    if *value == T::default() {
        serializer.serialize_map(Some(0))?.end()
    } else {
        value.serialize(serializer)
    }
}

impl PlanResult {
    pub fn failure(err: &PlanError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            ..Self::default()
        }
    }

    /// Ids of the planned stops in visiting order.
    pub fn stop_ids(&self) -> Vec<&str> {
        self.route.iter().map(|planned| planned.stop.id.as_str()).collect()
    }
}

/// Plans the route with great-circle travel times.
///
/// Never fails: validation errors come back as `success: false`.
pub fn generate_route_plan(request: &PlanRequest) -> PlanResult {
    generate_route_plan_with(request, &HaversineMatrix::new(request.config.clone()))
}

/// Plans the route with travel times from `provider`.
pub fn generate_route_plan_with<P>(request: &PlanRequest, provider: &P) -> PlanResult
where
    P: DistanceMatrixProvider + ?Sized,
{
    try_generate_route_plan_with(request, provider).unwrap_or_else(|err| {
        warn!(error = %err, "route plan request rejected");
        PlanResult::failure(&err)
    })
}

pub fn try_generate_route_plan(request: &PlanRequest) -> Result<PlanResult, PlanError> {
    try_generate_route_plan_with(request, &HaversineMatrix::new(request.config.clone()))
}

pub fn try_generate_route_plan_with<P>(request: &PlanRequest, provider: &P) -> Result<PlanResult, PlanError>
where
    P: DistanceMatrixProvider + ?Sized,
{
    let started = Instant::now();
    let PlanRequest {
        stops,
        start_point,
        constraints,
        weights,
        config,
    } = request;

    if stops.is_empty() {
        return Err(PlanError::EmptyStops);
    }
    constraints.validate()?;

    let (eligible, excluded) = filter_eligible(stops);
    if eligible.is_empty() {
        return Err(PlanError::NoEligibleStops {
            excluded: excluded.len(),
        });
    }

    info!(
        candidates = stops.len(),
        eligible = eligible.len(),
        shift_start = %format_minutes(constraints.shift_start_minutes),
        shift_end = %format_minutes(constraints.shift_end_minutes),
        "generating route plan"
    );

    let hour_of_day = constraints.start_hour();
    let matrix = DistanceMatrix::build(provider, *start_point, &eligible, hour_of_day)
        .charging_start_leg(config.count_start_leg);
    let context = RouteContext::new(&eligible, &matrix, constraints, weights);

    let initial = build_initial_route(&context);
    let initial_objective = context.objective(&initial.route);
    let outcome = optimize_route(initial.route, &context, config);

    let feasibility = context.feasibility(&outcome.route);
    let objective = objective_from(&feasibility, &outcome.route, &eligible, weights);
    let schedule = calculate_schedule(&outcome.route, &eligible, &matrix, constraints);

    let unrouted = unrouted_stops(&eligible, &outcome.route, &initial.dropped_must_visit);
    let route: Vec<PlannedStop> = outcome
        .route
        .iter()
        .zip(schedule)
        .map(|(&index, schedule)| PlannedStop {
            stop: eligible[index].clone(),
            schedule,
        })
        .collect();

    let optimization_time_ms = started.elapsed().as_millis() as u64;
    info!(
        stops = route.len(),
        objective,
        feasible = feasibility.feasible,
        elapsed_ms = optimization_time_ms,
        "route plan ready"
    );

    Ok(PlanResult {
        success: true,
        error: None,
        stats: PlanStats {
            route: feasibility.stats.clone(),
            objective,
            total_stops: route.len(),
            excluded_stops: excluded.len(),
            optimization_time_ms,
            engine_version: config.engine_version.clone(),
        },
        route,
        diagnostics: Diagnostics {
            candidate_pool_size: stops.len(),
            excluded_stops: excluded,
            unrouted_stops: unrouted,
            feasibility,
            hour_of_day,
            initial_objective,
            iterations: outcome.iterations,
            improving_iterations: outcome.improving_iterations,
            stop_reason: Some(outcome.stop_reason),
        },
    })
}

/// Splits stops into routable ones and exclusions, preserving input order.
///
/// Coordinates are validated here once; nothing downstream re-checks them.
pub fn filter_eligible(stops: &[Stop]) -> (Vec<Stop>, Vec<ExcludedStop>) {
    let mut eligible = Vec::with_capacity(stops.len());
    let mut excluded = Vec::new();

    for stop in stops {
        let reason = if stop.coords().is_none() {
            Some(ExclusionReason::MissingCoordinates)
        } else if stop.do_not_contact == Some(true) {
            Some(ExclusionReason::DoNotContact)
        } else if stop.routing_eligible == Some(false) {
            Some(ExclusionReason::NotRoutingEligible)
        } else {
            None
        };

        match reason {
            Some(reason) => excluded.push(ExcludedStop {
                stop_id: stop.id.clone(),
                reason,
            }),
            None => eligible.push(stop.clone()),
        }
    }

    (eligible, excluded)
}

fn unrouted_stops(eligible: &[Stop], route: &[usize], dropped_must_visit: &[usize]) -> Vec<UnroutedStop> {
    let routed: HashSet<usize> = route.iter().copied().collect();
    let dropped: HashSet<usize> = dropped_must_visit.iter().copied().collect();

    (0..eligible.len())
        .filter(|index| !routed.contains(index))
        .map(|index| UnroutedStop {
            stop_id: eligible[index].id.clone(),
            reason: if dropped.contains(&index) {
                UnroutedReason::ShiftOverflow
            } else {
                UnroutedReason::NotSelected
            },
        })
        .collect()
}
