//! route-planner
//!
//! Single-worker daily route optimization: pick and order stops for one
//! shift, respecting time windows, a lunch break and service durations.

pub mod config;
pub mod construction;
pub mod error;
pub mod feasibility;
pub mod haversine;
pub mod local_search;
pub mod matrix;
pub mod model;
pub mod objective;
pub mod planner;
pub mod schedule;
pub mod scoring;
pub mod traits;

pub use config::{Constraints, CongestionBand, EngineConfig, Weights};
pub use error::PlanError;
pub use model::{Route, StartPoint, Stop};
pub use planner::{PlanRequest, PlanResult, generate_route_plan, try_generate_route_plan};
