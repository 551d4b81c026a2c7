//! Pairwise travel times for one plan generation.

use crate::config::EngineConfig;
use crate::haversine::HaversineMatrix;
use crate::model::{StartPoint, Stop};
use crate::traits::DistanceMatrixProvider;

/// Travel minutes between eligible stops, plus from the start point to each.
///
/// Built once per run for a fixed hour of day. Indices match the
/// eligible-stop list; the diagonal is always 0.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    minutes: Vec<Vec<i32>>,
    start_leg: Vec<i32>,
    charge_start_leg: bool,
}

impl DistanceMatrix {
    /// Builds the matrix from any provider. The provider sees the start point
    /// as location 0 followed by the stops in order.
    pub fn build<P>(provider: &P, start: StartPoint, stops: &[Stop], hour_of_day: u32) -> Self
    where
        P: DistanceMatrixProvider + ?Sized,
    {
        let mut locations = Vec::with_capacity(stops.len() + 1);
        locations.push(start.coords());
        locations.extend(stops.iter().map(Stop::location));

        let grid = provider.matrix_for(&locations, hour_of_day);
        let n = stops.len();

        let start_leg = (0..n).map(|j| cell(&grid, 0, j + 1)).collect();
        let minutes = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0 } else { cell(&grid, i + 1, j + 1) })
                    .collect()
            })
            .collect();

        Self {
            minutes,
            start_leg,
            charge_start_leg: false,
        }
    }

    /// Whether route walks charge travel from the start point to the first stop.
    pub fn charging_start_leg(mut self, charge: bool) -> Self {
        self.charge_start_leg = charge;
        self
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    /// Travel minutes from stop `from` to stop `to`.
    pub fn get(&self, from: usize, to: usize) -> i32 {
        self.minutes[from][to]
    }

    /// Travel minutes from the start point to stop `to`.
    pub fn from_start(&self, to: usize) -> i32 {
        self.start_leg[to]
    }

    /// Travel charged when walking a route into `to` from `previous`.
    ///
    /// The first stop of a route costs nothing unless the start leg is charged.
    pub fn leg(&self, previous: Option<usize>, to: usize) -> i32 {
        match previous {
            Some(from) => self.get(from, to),
            None if self.charge_start_leg => self.from_start(to),
            None => 0,
        }
    }
}

/// Builds the matrix with great-circle travel times under `config`.
pub fn build_distance_matrix(
    start: StartPoint,
    stops: &[Stop],
    hour_of_day: u32,
    config: &EngineConfig,
) -> DistanceMatrix {
    DistanceMatrix::build(&HaversineMatrix::new(config.clone()), start, stops, hour_of_day)
        .charging_start_leg(config.count_start_leg)
}

// A short or ragged provider response reads as 0 rather than panicking.
fn cell(grid: &[Vec<i32>], i: usize, j: usize) -> i32 {
    grid.get(i).and_then(|row| row.get(j)).copied().unwrap_or(0)
}
